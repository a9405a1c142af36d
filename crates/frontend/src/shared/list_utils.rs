/// Универсальные утилиты для работы со списками (поиск, сортировка, даты, пагинация, UI компоненты)
use chrono::NaiveDate;
use contracts::domain::common::parse_record_date;
use contracts::shared::pagination::PaginationInfo;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::ops::Range;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Поля, по которым идёт поиск
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Подстрока без учёта регистра хотя бы в одном поле. Пустой запрос подходит всем.
    fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Inclusive date bounds parsed from filter input (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// An unparseable bound is dropped, the other one still applies.
    pub fn parse(date_from: &str, date_to: &str) -> Self {
        Self {
            from: parse_bound(date_from, "date_from"),
            to: parse_bound(date_to, "date_to"),
        }
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// A record whose date cannot be parsed never matches an active range.
    pub fn contains(&self, raw_date: &str) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(date) = parse_record_date(raw_date) else {
            return false;
        };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

fn parse_bound(raw: &str, name: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = parse_record_date(raw);
    if parsed.is_none() {
        log::debug!("Ignoring unparseable {} filter: {:?}", name, raw);
    }
    parsed
}

/// Одна страница отфильтрованного списка
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub info: PaginationInfo,
}

/// 1-based pages. Page 0 reads as 1, a page past the end clamps to the last one.
/// An empty set has zero pages and reports page 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let current_page = page.max(1).min(total_pages.max(1));

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let rows = if start < end {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        rows,
        info: PaginationInfo {
            current_page,
            total_pages,
            total_items,
            items_per_page: page_size,
        },
    }
}

/// Сортирует список по указанному полю (стабильно)
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// f64 сравнение для сортировки (NaN считается равным)
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Числовые id сравниваются как числа ("99" < "1001"), остальные как строки
pub fn cmp_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Сравнение строк без учёта регистра
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Разбивка текста на куски `(диапазон, совпадение?)` для подсветки (case-insensitive)
pub fn match_spans(text: &str, filter: &str) -> Vec<(Range<usize>, bool)> {
    let filter_lower = filter.trim().to_lowercase();
    let text_lower = text.to_lowercase();

    // Границы совпадений валидны только если lowercase не меняет длину строки
    if filter_lower.is_empty() || text_lower.len() != text.len() || !text_lower.contains(&filter_lower) {
        return vec![(0..text.len(), false)];
    }

    let mut spans = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let actual_pos = last_pos + pos;
        if actual_pos > last_pos {
            spans.push((last_pos..actual_pos, false));
        }
        let match_end = actual_pos + filter_lower.len();
        spans.push((actual_pos..match_end, true));
        last_pos = match_end;
    }
    if last_pos < text.len() {
        spans.push((last_pos..text.len(), false));
    }
    spans
}

/// Подсветка совпадений в тексте. Вызывать внутри `move ||`, чтобы ячейка следила за строкой поиска.
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let parts: Vec<AnyView> = match_spans(text, filter)
        .into_iter()
        .map(|(range, matched)| {
            let chunk = text[range].to_string();
            if matched {
                view! { <span class="search-highlight">{chunk}</span> }.into_any()
            } else {
                view! { <span>{chunk}</span> }.into_any()
            }
        })
        .collect();

    view! { <>{parts}</> }.into_any()
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    // Каждый ввод увеличивает поколение; срабатывает только последний таймер
    let generation = StoredValue::new(0u64);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();

        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(300).await;
            if generation.get_value() == current {
                on_change.run(new_value);
            }
        });
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        generation.update_value(|g| *g += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=is_filter_active
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        class="search-input__clear"
                        on:click=clear_filter
                        title="Clear"
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        name: &'static str,
        email: &'static str,
    }

    impl Searchable for Person {
        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![self.name.into(), self.email.into()]
        }
    }

    #[test]
    fn test_search_is_case_insensitive_or() {
        let p = Person {
            name: "Someone",
            email: "Jane@X.com",
        };
        assert!(p.matches_search("jane"));
        assert!(p.matches_search("SOME"));
        assert!(p.matches_search(""));
        assert!(!p.matches_search("bob"));
    }

    #[test]
    fn test_date_range_inclusive() {
        let range = DateRange::parse("2024-01-02", "2024-01-03");
        assert!(!range.contains("2024-01-01"));
        assert!(range.contains("2024-01-02"));
        assert!(range.contains("2024-01-03T23:59:59Z"));
        assert!(!range.contains("2024-01-04"));
    }

    #[test]
    fn test_date_range_bad_input() {
        // плохая граница игнорируется
        let range = DateRange::parse("not a date", "2024-01-03");
        assert_eq!(range.from, None);
        assert!(range.contains("2020-05-05"));

        let inactive = DateRange::parse("garbage", "");
        assert!(!inactive.is_active());
        assert!(inactive.contains("also garbage"));

        // плохая дата записи не проходит активный фильтр
        assert!(!range.contains("someday"));
    }

    #[test]
    fn test_paginate_concatenation_reproduces_set() {
        let items: Vec<u32> = (1..=23).collect();
        let first = paginate(&items, 1, 10);
        assert_eq!(first.info.total_pages, 3);
        assert_eq!(first.rows.len(), 10);

        let mut all = Vec::new();
        for page in 1..=first.info.total_pages {
            all.extend(paginate(&items, page, 10).rows);
        }
        assert_eq!(all, items);
        assert_eq!(paginate(&items, 3, 10).rows, vec![21, 22, 23]);
    }

    #[test]
    fn test_paginate_clamps() {
        let items: Vec<u32> = (1..=23).collect();
        let past_end = paginate(&items, 99, 10);
        assert_eq!(past_end.info.current_page, 3);
        assert_eq!(past_end.rows, vec![21, 22, 23]);

        let zero = paginate(&items, 0, 10);
        assert_eq!(zero.info.current_page, 1);

        let empty = paginate::<u32>(&[], 5, 10);
        assert_eq!(empty.info.total_pages, 0);
        assert_eq!(empty.info.current_page, 1);
        assert!(empty.rows.is_empty());
    }

    #[test]
    fn test_cmp_ids_numeric_aware() {
        assert_eq!(cmp_ids("99", "1001"), Ordering::Less);
        assert_eq!(cmp_ids("a-2", "a-10"), Ordering::Greater);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("date", "date", true), " ▲");
        assert_eq!(get_sort_indicator("date", "date", false), " ▼");
        assert_eq!(get_sort_indicator("date", "total", true), " ⇅");
    }

    #[test]
    fn test_match_spans_follow_query() {
        let text = "Anna Banks";
        assert_eq!(
            match_spans(text, "an"),
            vec![(0..2, true), (2..6, false), (6..8, true), (8..10, false)]
        );
        // тот же текст при новом запросе
        assert_eq!(match_spans(text, "BANK"), vec![(0..5, false), (5..9, true), (9..10, false)]);
        assert_eq!(match_spans(text, "zz"), vec![(0..10, false)]);
        assert_eq!(match_spans(text, "  "), vec![(0..10, false)]);
    }
}
