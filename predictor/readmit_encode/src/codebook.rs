//! Static category tables translating form answers to the numeric codes
//! the scorer was trained with.

/// Age brackets offered by the intake form, in display order.
pub const AGE_BRACKETS: [&str; 10] = [
    "[0-10)", "[10-20)", "[20-30)", "[30-40)", "[40-50)", "[50-60)", "[60-70)", "[70-80)",
    "[80-90)", "[90-100)",
];

/// A1C result levels, in display order.
pub const A1C_LEVELS: [&str; 4] = ["None", "Norm", ">7", ">8"];

/// Max glucose serum levels, in display order.
pub const GLUCOSE_LEVELS: [&str; 4] = ["None", "Norm", ">200", ">300"];

/// Answers for the two medication flags.
pub const YES_NO: [&str; 2] = ["Yes", "No"];

/// Lookup from a categorical label to the integer code used at training
/// time.
///
/// Total over its declared domain; any other label is unknown and must
/// be rejected by the caller.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    feature: &'static str,
    codes: Vec<(&'static str, f64)>,
}

impl CategoryMap {
    fn new(feature: &'static str, codes: Vec<(&'static str, f64)>) -> Self {
        Self { feature, codes }
    }

    /// Column name this map writes.
    pub fn feature(&self) -> &'static str {
        self.feature
    }

    /// Code for `label`, or `None` when the label is outside the domain.
    pub fn code(&self, label: &str) -> Option<f64> {
        self.codes
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, code)| *code)
    }

    /// Labels of the declared domain, in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codes.iter().map(|(label, _)| *label)
    }
}

/// One-hot encoded choice group: the selected label contributes a single
/// `<prefix><label>` column set to 1.
#[derive(Debug, Clone)]
pub struct OneHotGroup {
    prefix: &'static str,
    labels: &'static [&'static str],
}

impl OneHotGroup {
    /// Column-name prefix shared by the whole group.
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Column name for `label`, or `None` when the label is outside the
    /// declared domain.
    pub fn column_for(&self, label: &str) -> Option<String> {
        if self.labels.contains(&label) {
            Some(format!("{}{}", self.prefix, label))
        } else {
            None
        }
    }

    /// Labels of the declared domain, in declaration order.
    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }
}

/// The full set of category tables the encoder consults.
#[derive(Debug, Clone)]
pub struct Codebook {
    a1c: CategoryMap,
    glucose: CategoryMap,
    diabetes_med: CategoryMap,
    med_change: CategoryMap,
    age: OneHotGroup,
}

impl Codebook {
    /// The encoding conventions the readmission artifact was trained
    /// with. Codes must not change independently of the artifact.
    pub fn standard() -> Self {
        Self {
            a1c: CategoryMap::new(
                "A1Cresult",
                vec![("None", 0.0), ("Norm", 1.0), (">7", 2.0), (">8", 3.0)],
            ),
            glucose: CategoryMap::new(
                "max_glu_serum",
                vec![("None", 0.0), ("Norm", 1.0), (">200", 2.0), (">300", 3.0)],
            ),
            diabetes_med: CategoryMap::new("diabetesMed", vec![("Yes", 1.0), ("No", 0.0)]),
            med_change: CategoryMap::new("change", vec![("Yes", 1.0), ("No", 0.0)]),
            age: OneHotGroup {
                prefix: "age_",
                labels: &AGE_BRACKETS,
            },
        }
    }

    pub fn a1c(&self) -> &CategoryMap {
        &self.a1c
    }

    pub fn glucose(&self) -> &CategoryMap {
        &self.glucose
    }

    pub fn diabetes_med(&self) -> &CategoryMap {
        &self.diabetes_med
    }

    pub fn med_change(&self) -> &CategoryMap {
        &self.med_change
    }

    pub fn age(&self) -> &OneHotGroup {
        &self.age
    }
}
