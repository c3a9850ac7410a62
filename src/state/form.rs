//! Lead form data and the field reducer

use serde::{Deserialize, Serialize};

/// Everything collected from the lead across the wizard steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub insurance_industry: Option<String>,
    pub business_type: Option<String>,
    pub insurance_lines: Vec<String>,
    pub improvements: Vec<String>,
    pub annual_revenue: String,
    pub lead_generation: Vec<String>,
    pub website: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Single-choice fields (auto-advance on selection)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleField {
    InsuranceIndustry,
    BusinessType,
}

/// Set-valued fields toggled by multi-select steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiField {
    InsuranceLines,
    Improvements,
    LeadGeneration,
}

/// Free-text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    AnnualRevenue,
    Website,
    FirstName,
    LastName,
    Email,
    Phone,
}

impl TextField {
    /// Placeholder shown while the field is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            TextField::AnnualRevenue => "$ Annual Revenue",
            TextField::Website => "yourwebsite.com",
            TextField::FirstName => "First Name",
            TextField::LastName => "Last Name",
            TextField::Email => "Work Email",
            TextField::Phone => "+1 000 000 0000",
        }
    }
}

/// One update message per form field, applied through [`FormState::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    InsuranceIndustry(String),
    BusinessType(String),
    ToggleInsuranceLine(String),
    ToggleImprovement(String),
    AnnualRevenue(String),
    ToggleLeadGeneration(String),
    Website(String),
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
}

impl FieldUpdate {
    pub fn select(field: SingleField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            SingleField::InsuranceIndustry => FieldUpdate::InsuranceIndustry(value),
            SingleField::BusinessType => FieldUpdate::BusinessType(value),
        }
    }

    pub fn toggle(field: MultiField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            MultiField::InsuranceLines => FieldUpdate::ToggleInsuranceLine(value),
            MultiField::Improvements => FieldUpdate::ToggleImprovement(value),
            MultiField::LeadGeneration => FieldUpdate::ToggleLeadGeneration(value),
        }
    }

    pub fn text(field: TextField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            TextField::AnnualRevenue => FieldUpdate::AnnualRevenue(value),
            TextField::Website => FieldUpdate::Website(value),
            TextField::FirstName => FieldUpdate::FirstName(value),
            TextField::LastName => FieldUpdate::LastName(value),
            TextField::Email => FieldUpdate::Email(value),
            TextField::Phone => FieldUpdate::Phone(value),
        }
    }
}

impl FormState {
    /// Apply a single field update
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::InsuranceIndustry(v) => self.insurance_industry = Some(v),
            FieldUpdate::BusinessType(v) => self.business_type = Some(v),
            FieldUpdate::ToggleInsuranceLine(v) => toggle(&mut self.insurance_lines, v),
            FieldUpdate::ToggleImprovement(v) => toggle(&mut self.improvements, v),
            FieldUpdate::ToggleLeadGeneration(v) => toggle(&mut self.lead_generation, v),
            FieldUpdate::AnnualRevenue(v) => self.annual_revenue = v,
            FieldUpdate::Website(v) => self.website = v,
            FieldUpdate::FirstName(v) => self.first_name = v,
            FieldUpdate::LastName(v) => self.last_name = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Phone(v) => self.phone = v,
        }
    }

    pub fn single(&self, field: SingleField) -> Option<&str> {
        match field {
            SingleField::InsuranceIndustry => self.insurance_industry.as_deref(),
            SingleField::BusinessType => self.business_type.as_deref(),
        }
    }

    pub fn multi(&self, field: MultiField) -> &[String] {
        match field {
            MultiField::InsuranceLines => &self.insurance_lines,
            MultiField::Improvements => &self.improvements,
            MultiField::LeadGeneration => &self.lead_generation,
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::AnnualRevenue => &self.annual_revenue,
            TextField::Website => &self.website,
            TextField::FirstName => &self.first_name,
            TextField::LastName => &self.last_name,
            TextField::Email => &self.email,
            TextField::Phone => &self.phone,
        }
    }

    /// True when every contact field on the last step has a value
    pub fn contact_complete(&self) -> bool {
        [&self.first_name, &self.last_name, &self.email, &self.phone]
            .iter()
            .all(|v| !v.is_empty())
    }
}

/// Insert-or-remove keeping insertion order and no duplicates
fn toggle(values: &mut Vec<String>, value: String) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod apply {
        use super::*;

        #[test]
        fn test_single_choice_last_write_wins() {
            let mut form = FormState::default();
            form.apply(FieldUpdate::select(SingleField::BusinessType, "Other"));
            form.apply(FieldUpdate::select(
                SingleField::BusinessType,
                "Independent Agent",
            ));
            assert_eq!(form.business_type.as_deref(), Some("Independent Agent"));
        }

        #[test]
        fn test_toggle_adds_then_removes() {
            let mut form = FormState::default();
            form.apply(FieldUpdate::toggle(MultiField::InsuranceLines, "Life"));
            assert_eq!(form.insurance_lines, vec!["Life".to_string()]);
            form.apply(FieldUpdate::toggle(MultiField::InsuranceLines, "Life"));
            assert!(form.insurance_lines.is_empty());
        }

        #[test]
        fn test_toggle_is_self_inverse() {
            let mut form = FormState::default();
            form.apply(FieldUpdate::toggle(MultiField::LeadGeneration, "seo"));
            form.apply(FieldUpdate::toggle(MultiField::LeadGeneration, "google"));
            let members = |form: &FormState| {
                let mut values = form.lead_generation.clone();
                values.sort();
                values
            };
            let before = members(&form);

            // Membership is restored; position may move to the end
            for value in ["seo", "referrals", "google"] {
                form.apply(FieldUpdate::toggle(MultiField::LeadGeneration, value));
                form.apply(FieldUpdate::toggle(MultiField::LeadGeneration, value));
                assert_eq!(members(&form), before);
            }
        }

        #[test]
        fn test_double_toggle_moves_value_to_end() {
            let mut form = FormState::default();
            for value in ["Life", "Health", "Life", "Life"] {
                form.apply(FieldUpdate::toggle(MultiField::InsuranceLines, value));
            }
            assert_eq!(form.multi(MultiField::InsuranceLines), ["Health", "Life"]);
        }

        #[test]
        fn test_toggle_keeps_insertion_order() {
            let mut form = FormState::default();
            for value in ["sales", "leads", "digital"] {
                form.apply(FieldUpdate::toggle(MultiField::Improvements, value));
            }
            assert_eq!(form.multi(MultiField::Improvements), ["sales", "leads", "digital"]);
        }

        #[test]
        fn test_text_fields_assign_verbatim() {
            let mut form = FormState::default();
            form.apply(FieldUpdate::text(TextField::Website, "  example.com "));
            form.apply(FieldUpdate::text(TextField::Email, "a@b.co"));
            assert_eq!(form.text(TextField::Website), "  example.com ");
            assert_eq!(form.email, "a@b.co");
        }
    }

    mod contact {
        use super::*;

        #[test]
        fn test_contact_incomplete_by_default() {
            assert!(!FormState::default().contact_complete());
        }

        #[test]
        fn test_contact_requires_all_four() {
            let mut form = FormState {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                ..Default::default()
            };
            assert!(!form.contact_complete());
            form.phone = "+1 555 0100".into();
            assert!(form.contact_complete());
        }
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(FormState::default()).unwrap();
        assert!(json.get("insuranceIndustry").is_some());
        assert!(json.get("leadGeneration").is_some());
        assert!(json.get("firstName").is_some());
        assert_eq!(json["insuranceIndustry"], serde_json::Value::Null);
    }
}
