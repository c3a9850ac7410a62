//! Normalized webhook payload built from the collected form

use crate::state::FormState;
use serde::Serialize;

/// Lead source reported to the webhook
pub const SOURCE: &str = "Intake Funnel";
/// Tags attached to every submitted lead
pub const TAGS: [&str; 2] = ["intake-funnel", "new-lead"];

const NO_REVENUE: &str = "Prefer not to answer";
const NO_LEAD_GENERATION: &str = "None";
const NO_WEBSITE: &str = "No website";

/// One `{key, value}` entry of `customFields`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomField {
    pub key: &'static str,
    pub value: Option<String>,
}

impl CustomField {
    fn new(key: &'static str, value: Option<String>) -> Self {
        Self { key, value }
    }
}

/// Body POSTed to the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub custom_fields: Vec<CustomField>,
    pub source: &'static str,
    pub tags: [&'static str; 2],
}

impl LeadPayload {
    pub fn from_form(form: &FormState) -> Self {
        let custom_fields = vec![
            CustomField::new("insurance_industry", form.insurance_industry.clone()),
            CustomField::new("business_type", form.business_type.clone()),
            CustomField::new("insurance_lines", Some(form.insurance_lines.join(", "))),
            CustomField::new("improvements", Some(form.improvements.join(", "))),
            CustomField::new(
                "annual_revenue",
                Some(or_default(&form.annual_revenue, NO_REVENUE)),
            ),
            CustomField::new(
                "lead_generation_methods",
                Some(if form.lead_generation.is_empty() {
                    NO_LEAD_GENERATION.to_string()
                } else {
                    form.lead_generation.join(", ")
                }),
            ),
            CustomField::new("website", Some(or_default(&form.website, NO_WEBSITE))),
        ];

        Self {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            custom_fields,
            source: SOURCE,
            tags: TAGS,
        }
    }

    /// Look up a custom field value by key
    #[cfg(test)]
    pub fn custom_field(&self, key: &str) -> Option<&str> {
        self.custom_fields
            .iter()
            .find(|f| f.key == key)
            .and_then(|f| f.value.as_deref())
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
