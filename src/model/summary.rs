use chrono::NaiveDate;
use serde_json::Number;

/// Token written for any value that is missing or not meaningful
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed column header of the summary table
pub const SUMMARY_HEADER: [&str; 12] = [
    "VIN",
    "Make",
    "Model",
    "Year",
    "Trim",
    "Current_Price",
    "Current_Miles",
    "First_Seen",
    "Last_Seen",
    "Price_History_Count",
    "Lowest_Price",
    "Highest_Price",
];

/// Per-VIN join of the current listing with its history extremes
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u32>,
    pub trim: Option<String>,
    pub current_price: Option<Number>,
    pub current_miles: Option<Number>,
    pub first_seen: Option<NaiveDate>,
    pub last_seen: Option<NaiveDate>,
    pub history_count: usize,
    pub lowest_price: Option<Number>,
    pub highest_price: Option<Number>,
}

impl SummaryRow {
    /// Renders the row as the twelve text fields of the summary table
    pub fn to_fields(&self) -> [String; 12] {
        [
            self.vin.clone(),
            render_text(self.make.as_deref()),
            render_text(self.model.as_deref()),
            self.year
                .filter(|y| *y > 0)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |y| y.to_string()),
            render_text(self.trim.as_deref()),
            render_amount(self.current_price.as_ref()),
            render_amount(self.current_miles.as_ref()),
            render_date(self.first_seen),
            render_date(self.last_seen),
            self.history_count.to_string(),
            render_amount(self.lowest_price.as_ref()),
            render_amount(self.highest_price.as_ref()),
        ]
    }
}

fn render_text(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

// Zero counts as missing: the remote reports 0 when it has no price or odometer.
fn render_amount(value: Option<&Number>) -> String {
    match value {
        Some(n) if n.as_f64().is_some_and(|v| v != 0.0) => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn render_date(value: Option<NaiveDate>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |d| d.format("%Y-%m-%d").to_string(),
    )
}
