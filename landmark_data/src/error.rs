// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Why a dataset collection was rejected.
#[derive(Error, Debug)]
pub enum DataError {
    /// The text was not valid JSON for the collection's schema.
    #[error("failed to parse {collection}: {source}")]
    Json {
        /// Collection name, e.g. `"landmarks"`.
        collection: &'static str,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A color field is not `#RRGGBB`.
    #[error("{collection} `{id}`: {field} `{value}` is not a #RRGGBB color")]
    InvalidColor {
        /// Collection name.
        collection: &'static str,
        /// Record id.
        id: String,
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: String,
    },

    /// An opacity lies outside `[0, 1]`.
    #[error("{collection} `{id}`: opacity {value} is outside [0, 1]")]
    InvalidOpacity {
        /// Collection name.
        collection: &'static str,
        /// Record id.
        id: String,
        /// Offending value.
        value: f64,
    },

    /// A link is not an absolute `http(s)` URL.
    #[error("{collection} `{id}`: `{url}` is not an http(s) URL")]
    InvalidUrl {
        /// Collection name.
        collection: &'static str,
        /// Record id.
        id: String,
        /// Offending URL.
        url: String,
    },

    /// A `model` landmark lacks usable model metadata.
    #[error("model landmark `{id}`: invalid model metadata: {source}")]
    InvalidModelMetadata {
        /// Landmark id.
        id: String,
        /// Why the metadata did not decode.
        #[source]
        source: serde_json::Error,
    },

    /// A number that must be finite is not.
    #[error("{collection} `{id}`: {field} must be finite")]
    NonFinite {
        /// Collection name.
        collection: &'static str,
        /// Record id.
        id: String,
        /// Offending field.
        field: &'static str,
    },

    /// Two records share an id.
    #[error("duplicate {collection} id `{id}`")]
    DuplicateId {
        /// Collection name.
        collection: &'static str,
        /// Repeated id.
        id: String,
    },
}
