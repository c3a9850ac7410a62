//! Wizard steps, their option catalogs and forward-navigation gates

use super::form::{FormState, MultiField, SingleField, TextField};

/// Number of steps in the wizard
pub const TOTAL_STEPS: u8 = 8;

/// Currently displayed step, always within `1..=TOTAL_STEPS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardPosition(u8);

impl Default for WizardPosition {
    fn default() -> Self {
        Self(1)
    }
}

impl WizardPosition {
    pub fn get(self) -> u8 {
        self.0
    }

    /// Move forward one step; no-op on the last step
    pub fn advance(&mut self) {
        self.0 = (self.0 + 1).min(TOTAL_STEPS);
    }

    /// Move back one step; no-op on the first step
    pub fn retreat(&mut self) {
        self.0 = self.0.saturating_sub(1).max(1);
    }

    pub fn step(self) -> Step {
        Step::ALL[(self.0 - 1) as usize]
    }

    /// Completion ratio shown by the progress bar
    pub fn progress(self) -> f64 {
        f64::from(self.0) / f64::from(TOTAL_STEPS)
    }
}

/// A selectable option: the stored value and how it is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
}

const fn plain(value: &'static str) -> ChoiceOption {
    ChoiceOption {
        value,
        title: value,
        subtitle: None,
    }
}

const fn detailed(
    value: &'static str,
    title: &'static str,
    subtitle: &'static str,
) -> ChoiceOption {
    ChoiceOption {
        value,
        title,
        subtitle: Some(subtitle),
    }
}

pub const INDUSTRY_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption {
        value: "yes",
        title: "Yes",
        subtitle: None,
    },
    ChoiceOption {
        value: "no",
        title: "No",
        subtitle: None,
    },
];

pub const BUSINESS_TYPE_OPTIONS: &[ChoiceOption] = &[
    plain("Insurance Agency/Brokerage"),
    plain("Independent Agent"),
    plain("Insurance Carrier"),
    plain("Other"),
];

pub const INSURANCE_LINE_OPTIONS: &[ChoiceOption] = &[
    plain("Life"),
    plain("Health"),
    plain("Property & Casualty"),
    plain("Medicare"),
    plain("Commercial"),
    plain("Other"),
];

pub const IMPROVEMENT_OPTIONS: &[ChoiceOption] = &[
    detailed("leads", "Leads Generation", "Generate More Qualified Leads"),
    detailed("sales", "Sales", "Convert More Leads Into Sales"),
    detailed(
        "quality",
        "Improve Lead Quality",
        "Increase Contact and Conversion Rate",
    ),
    detailed(
        "digital",
        "Digital Presence",
        "Get discovered by people looking for insurance online",
    ),
];

pub const LEAD_GENERATION_OPTIONS: &[ChoiceOption] = &[
    detailed(
        "outbound",
        "Outbound Prospecting",
        "Cold calling, Emails, LinkedIn",
    ),
    detailed("buying", "Buying Leads", "External lead vendors"),
    detailed(
        "social",
        "Social Media Ads",
        "Facebook, Instagram, Youtube, Tiktok, LinkedIn",
    ),
    detailed("google", "Google Ads", "Search Engine Marketing"),
    detailed(
        "referrals",
        "Referrals",
        "Word of mouth, past clients, family and friends",
    ),
    detailed("seo", "SEO", "Organic traffic to your website"),
    detailed(
        "traditional",
        "Traditional Advertising",
        "TV, Radio, Billboards",
    ),
    detailed("organic", "Organic Content", "Social media, Blog, Videos"),
    detailed("networking", "Networking", "Conferences"),
];

/// What kind of input a step collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Single(SingleField, &'static [ChoiceOption]),
    Multi(MultiField, &'static [ChoiceOption]),
    Text(TextField),
    Contact,
}

/// Something on a step that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Choice(usize),
    Field(TextField),
    Back,
    Next,
    Skip,
    Submit,
}

pub const CONTACT_FIELDS: [TextField; 4] = [
    TextField::FirstName,
    TextField::LastName,
    TextField::Email,
    TextField::Phone,
];

/// The eight wizard steps in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    InsuranceIndustry,
    BusinessType,
    InsuranceLines,
    Improvements,
    AnnualRevenue,
    LeadGeneration,
    Website,
    Contact,
}

impl Step {
    pub const ALL: [Step; TOTAL_STEPS as usize] = [
        Step::InsuranceIndustry,
        Step::BusinessType,
        Step::InsuranceLines,
        Step::Improvements,
        Step::AnnualRevenue,
        Step::LeadGeneration,
        Step::Website,
        Step::Contact,
    ];

    pub fn kind(self) -> StepKind {
        match self {
            Step::InsuranceIndustry => {
                StepKind::Single(SingleField::InsuranceIndustry, INDUSTRY_OPTIONS)
            }
            Step::BusinessType => StepKind::Single(SingleField::BusinessType, BUSINESS_TYPE_OPTIONS),
            Step::InsuranceLines => {
                StepKind::Multi(MultiField::InsuranceLines, INSURANCE_LINE_OPTIONS)
            }
            Step::Improvements => StepKind::Multi(MultiField::Improvements, IMPROVEMENT_OPTIONS),
            Step::AnnualRevenue => StepKind::Text(TextField::AnnualRevenue),
            Step::LeadGeneration => {
                StepKind::Multi(MultiField::LeadGeneration, LEAD_GENERATION_OPTIONS)
            }
            Step::Website => StepKind::Text(TextField::Website),
            Step::Contact => StepKind::Contact,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Step::InsuranceIndustry => "Do you work in the Insurance industry?",
            Step::BusinessType => "Which best describes your business?",
            Step::InsuranceLines => "Select Your Insurance Lines",
            Step::Improvements => "Where do you feel your firm can improve and do better?",
            Step::AnnualRevenue => "How much revenue do you generate per year?",
            Step::LeadGeneration => "How are you currently generating new leads?",
            Step::Website => "What's your company website?",
            Step::Contact => "How can we connect with you?",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Step::InsuranceIndustry | Step::BusinessType => "Please choose an option",
            Step::InsuranceLines => "Select all the primary types of insurance you sell",
            Step::Improvements => "Select all that apply",
            Step::AnnualRevenue => {
                "Why are we asking this? It helps us determine what type of partnership will be the most useful for you"
            }
            Step::LeadGeneration => "Please select all that apply",
            Step::Website => "If you don't have a website choose the option below",
            Step::Contact => {
                "To get your personalized offer and pricing, please enter your details"
            }
        }
    }

    /// Label of the explicit skip affordance, for steps that have one
    pub fn skip_label(self) -> Option<&'static str> {
        match self {
            Step::AnnualRevenue => Some("Prefer not to answer"),
            Step::LeadGeneration => Some("None of the above"),
            Step::Website => Some("I don't have a website"),
            _ => None,
        }
    }

    pub fn has_back(self) -> bool {
        !matches!(self, Step::InsuranceIndustry | Step::Contact)
    }

    /// Whether the step shows an explicit Next button
    pub fn has_next(self) -> bool {
        matches!(
            self,
            Step::InsuranceLines
                | Step::Improvements
                | Step::AnnualRevenue
                | Step::LeadGeneration
                | Step::Website
        )
    }

    /// Forward gate; skip affordances bypass it
    pub fn can_proceed(self, form: &FormState, submitting: bool) -> bool {
        match self.kind() {
            StepKind::Single(field, _) => form.single(field).is_some(),
            StepKind::Multi(field, _) => !form.multi(field).is_empty(),
            StepKind::Text(field) => !form.text(field).is_empty(),
            StepKind::Contact => form.contact_complete() && !submitting,
        }
    }

    /// Focus order for keyboard navigation
    pub fn focus_targets(self) -> Vec<FocusTarget> {
        let mut targets = match self.kind() {
            StepKind::Single(_, options) | StepKind::Multi(_, options) => {
                (0..options.len()).map(FocusTarget::Choice).collect()
            }
            StepKind::Text(field) => vec![FocusTarget::Field(field)],
            StepKind::Contact => CONTACT_FIELDS.iter().copied().map(FocusTarget::Field).collect(),
        };
        if self.has_back() {
            targets.push(FocusTarget::Back);
        }
        if self.has_next() {
            targets.push(FocusTarget::Next);
        }
        if self.skip_label().is_some() {
            targets.push(FocusTarget::Skip);
        }
        if self == Step::Contact {
            targets.push(FocusTarget::Submit);
        }
        targets
    }
}
