use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Display metadata
// ---------------------------------------------------------------------------

/// How to format the numeric value on a KPI card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

/// Visual trend of the indicator (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
    Warning,
}

// ---------------------------------------------------------------------------
// Overview dashboard
// ---------------------------------------------------------------------------

/// KPI карточки главной страницы.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub total_submissions: usize,
    /// Сумма `total` по всем заказам
    pub total_revenue: f64,
    /// Уникальные email покупателей
    pub total_customers: usize,
}

// ---------------------------------------------------------------------------
// Sales analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesKpis {
    /// Выручка по выполненным заказам
    pub completed_revenue: f64,
    /// Сумма заказов в статусах pending + processing
    pub active_deals_value: f64,
    pub new_leads: usize,
    pub converted_leads: usize,
    /// Доля converted среди всех заявок, %
    pub conversion_rate: f64,
}

/// Этап воронки продаж.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub name: String,
    pub count: usize,
    /// "Submissions" для лидов, "Deals" для закрытых сделок
    pub unit: String,
    /// Оценка стоимости этапа: количество × ставка этапа, USD
    pub value: f64,
}

/// Выручка за календарный месяц.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    /// `YYYY-MM`
    pub month: String,
    /// `Jan 24`
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub quantity: u32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub total: f64,
}

/// Доля в круговой диаграмме.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub key: String,
    pub label: String,
    pub count: usize,
    /// Доля от общего количества, %
    pub percent: f64,
}
