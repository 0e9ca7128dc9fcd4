//! Sales ledger - the in-memory sales container.
//!
//! The ledger owns an insertion-ordered list of sales and the derived
//! `today_total`. The aggregate is recomputed from scratch after every
//! mutation that changes which sales are held, so it can never drift from
//! the list (for example when a stale total crosses midnight).

use crate::resource::{null_as_default, SalesDocument};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Length of the random part of a sale id.
const SALE_ID_SUFFIX_LEN: usize = 9;

/// A sale as entered by the caller, before the ledger assigns identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    /// Business date of the sale
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Sale amount
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: f64,
    /// Any other fields (items, customer, payment method, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SaleDraft {
    /// Create a draft with a business date and a total.
    pub fn new(date: impl Into<String>, total: f64) -> Self {
        Self {
            date: date.into(),
            total,
            fields: Map::new(),
        }
    }

    /// Attach an extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// A sale held by the ledger.
///
/// Stored sales are decoded leniently so one odd record never rejects the
/// whole history: numeric `id`/`timestamp`/`date` values are kept as their
/// decimal text, and a `total` that is not a number (or numeric text) is
/// read as NaN, which the daily aggregate ignores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Ledger-assigned identifier
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    /// When the sale was recorded (RFC 3339, UTC)
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: String,
    /// Business date of the sale, used for the daily aggregate
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_total")]
    pub total: f64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SaleRecord {
    /// The sale's business date as a calendar day, if it can be read.
    pub fn business_date(&self) -> Option<NaiveDate> {
        parse_business_date(&self.date)
    }

    /// Whether this sale counts towards the total of `day`.
    pub fn falls_on(&self, day: NaiveDate) -> bool {
        self.business_date() == Some(day)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_total<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// Ordered sales with an always-consistent daily total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesLedger {
    sales: Vec<SaleRecord>,
    today_total: f64,
}

impl SalesLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// All sales in insertion order.
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// Sum of today's sales as of the last mutation.
    pub fn today_total(&self) -> f64 {
        self.today_total
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Get a sale by id.
    pub fn get(&self, id: &str) -> Option<&SaleRecord> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Record a new sale using the wall clock.
    pub fn add_sale(&mut self, draft: SaleDraft) -> &SaleRecord {
        self.add_sale_at(draft, Local::now())
    }

    /// Record a new sale as of `now`.
    ///
    /// The ledger assigns `id` and `timestamp`; any caller-supplied values
    /// for those keys are dropped.
    pub fn add_sale_at(&mut self, draft: SaleDraft, now: DateTime<Local>) -> &SaleRecord {
        let utc = now.with_timezone(&Utc);
        let mut fields = draft.fields;
        fields.remove("id");
        fields.remove("timestamp");

        let record = SaleRecord {
            id: generate_sale_id(utc),
            timestamp: utc.to_rfc3339_opts(SecondsFormat::Millis, true),
            date: draft.date,
            total: draft.total,
            fields,
        };

        self.sales.push(record);
        self.recompute(now.date_naive());
        let last = self.sales.len() - 1;
        &self.sales[last]
    }

    /// Replace all sales using the wall clock for the aggregate.
    pub fn load_sales(&mut self, records: Vec<SaleRecord>) {
        self.load_sales_at(records, Local::now().date_naive())
    }

    /// Replace all sales verbatim. Ids and timestamps are kept as given.
    pub fn load_sales_at(&mut self, records: Vec<SaleRecord>, today: NaiveDate) {
        self.sales = records;
        self.recompute(today);
    }

    /// Drop every sale.
    pub fn clear_sales(&mut self) {
        self.sales.clear();
        self.today_total = 0.0;
    }

    /// Recompute the aggregate for the current day without changing sales.
    pub fn refresh_today_total(&mut self) {
        self.refresh_today_total_at(Local::now().date_naive())
    }

    /// Recompute the aggregate for `today` without changing sales.
    pub fn refresh_today_total_at(&mut self, today: NaiveDate) {
        self.recompute(today);
    }

    /// Export the ledger in its stored document shape.
    pub fn snapshot(&self) -> SalesDocument {
        SalesDocument {
            sales: self.sales.clone(),
            today_total: self.today_total,
        }
    }

    fn recompute(&mut self, today: NaiveDate) {
        self.today_total = today_total(&self.sales, today);
    }
}

/// Sum the totals of all sales dated `today`.
///
/// Non-finite totals count as zero.
pub fn today_total(sales: &[SaleRecord], today: NaiveDate) -> f64 {
    sales
        .iter()
        .filter(|sale| sale.falls_on(today))
        .map(|sale| sale.total)
        .filter(|total| total.is_finite())
        .sum()
}

/// Read a business date as a calendar day.
///
/// Accepted forms:
/// - RFC 3339 date-times, converted to the local calendar day
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DDTHH:MM[:SS[.fff]]` without an offset, taken as written
/// - integer Unix milliseconds, converted to the local calendar day
pub fn parse_business_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|instant| instant.with_timezone(&Local).date_naive());
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Local).date_naive());
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.date())
}

/// Generate a sale id: `sale_<unix millis>_<random suffix>`.
pub fn generate_sale_id(now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "sale_{}_{}",
        now.timestamp_millis(),
        &random[..SALE_ID_SUFFIX_LEN]
    )
}
