#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod dataset;
pub mod error;
pub mod federation;
mod graph_ref;
pub mod union;

pub use graph_ref::{GraphRef, Provenance};

pub mod model {
    pub use rdf_compose_model::*;
}

pub mod sparql {
    pub use rdf_compose_sparql::*;
}

pub mod common {
    pub use rdf_compose_common::*;
}

pub mod memory {
    pub use rdf_compose_memory::*;
}
