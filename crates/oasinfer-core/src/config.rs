//! Update policy and tuning knobs of the inference engine.

/// How observed values are folded into existing schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Generalize: merge observed values into type-level schemas and unify paths.
    #[default]
    Gen,
    /// Keep every observed literal as a distinct `oneOf` alternative.
    Replay,
    /// Literal-preserving in the schema builders, non-rewriting for paths.
    Mixed,
}

impl UpdateMode {
    /// Whether schemas are generalized rather than accumulated as literals.
    ///
    /// `Mixed` takes the literal branch in every builder.
    pub fn generalizes(self) -> bool {
        matches!(self, UpdateMode::Gen)
    }
}

impl std::fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UpdateMode::Gen => "gen",
            UpdateMode::Replay => "replay",
            UpdateMode::Mixed => "mixed",
        })
    }
}

impl std::str::FromStr for UpdateMode {
    type Err = String;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode.to_ascii_lowercase().as_str() {
            "gen" => Ok(UpdateMode::Gen),
            "replay" => Ok(UpdateMode::Replay),
            "mixed" => Ok(UpdateMode::Mixed),
            other => Err(format!(
                "unknown update mode '{other}', expected one of: gen, replay, mixed"
            )),
        }
    }
}

/// Default maximum number of differing keys and types tolerated between the responses of
/// two paths before they are considered different endpoints.
pub const DEFAULT_RECONCILIATION_THRESHOLD: usize = 5;

/// Configuration of an [`Updater`](crate::build::update::Updater).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UpdateConfig {
    /// The update policy, constant for a whole stream of exchanges.
    pub mode: UpdateMode,

    /// Maximum `differing_keys + differing_types` between overlapping responses for two
    /// paths to be unified into one template.
    pub reconciliation_threshold: usize,

    /// Request headers never recorded as header parameters. Compared case-insensitively.
    pub ignored_request_headers: Vec<String>,

    /// Response headers never recorded in response header schemas. Compared
    /// case-insensitively.
    pub ignored_response_headers: Vec<String>,
}

impl UpdateConfig {
    /// Creates the default configuration for `mode`.
    pub fn new(mode: UpdateMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Sets the reconciliation threshold.
    pub fn reconciliation_threshold(mut self, threshold: usize) -> Self {
        self.reconciliation_threshold = threshold;
        self
    }

    /// Whether `name` is an ignored request header.
    pub fn ignores_request_header(&self, name: &str) -> bool {
        contains_ignore_case(&self.ignored_request_headers, name)
    }

    /// Whether `name` is an ignored response header.
    pub fn ignores_response_header(&self, name: &str) -> bool {
        contains_ignore_case(&self.ignored_response_headers, name)
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            mode: UpdateMode::Gen,
            reconciliation_threshold: DEFAULT_RECONCILIATION_THRESHOLD,
            ignored_request_headers: ["accept", "content-type", "authorization", "content-length"]
                .map(String::from)
                .to_vec(),
            ignored_response_headers: ["content-type", "content-length"]
                .map(String::from)
                .to_vec(),
        }
    }
}

fn contains_ignore_case(names: &[String], name: &str) -> bool {
    names.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}
