use thiserror::Error;

/// Data-integrity failures detected while loading the catalog.
///
/// All of these are raised before the first frame runs; nothing downstream
/// ever sees a zero period or a half-specified ring.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{body}: invalid color {value:?}, expected #RRGGBB")]
    InvalidColor { body: String, value: String },

    /// An entry that does not deserialize: missing field, wrong type.
    #[error("{body}: {source}")]
    MalformedEntry {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{body}: {field} must be non-zero and finite (got {value})")]
    InvalidPeriod {
        body: String,
        field: &'static str,
        value: f64,
    },

    #[error("{body}: {field} must be positive and finite (got {value})")]
    InvalidDimension {
        body: String,
        field: &'static str,
        value: f64,
    },

    #[error("{body}: a {kind} cannot have orbital radius {value}")]
    InvalidOrbitalRadius {
        body: String,
        kind: &'static str,
        value: f64,
    },

    #[error("{body}: hasRings is set but {missing} is missing")]
    MissingRingRadius {
        body: String,
        missing: &'static str,
    },

    #[error("{body}: ring inner radius {inner} must be below outer radius {outer}")]
    InvalidRingBand {
        body: String,
        inner: f64,
        outer: f64,
    },

    #[error("duplicate body id {0:?}")]
    DuplicateBody(String),

    #[error("duplicate moon id {0:?}")]
    DuplicateMoon(String),

    #[error("catalog has no star")]
    MissingStar,

    #[error("{0}: only one star is supported")]
    ExtraStar(String),

    #[error("asteroid belt band [{inner}, {outer}] with {count} asteroids is invalid")]
    InvalidBelt {
        inner: f64,
        outer: f64,
        count: usize,
    },
}
