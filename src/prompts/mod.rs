//! Prompt compiler - deterministic translation of typed request bundles
//! into natural-language instructions for the external generative model.
//!
//! Every function here is pure: same configuration in, byte-identical text
//! out. Section order inside composed prompts is a contract with the model,
//! not a style choice.

pub mod edit;
pub mod expand;
pub mod lab;
pub mod studio;
pub mod style;

/// Turn a snake_case identifier into display text ("canon_eos_r5" -> "canon eos r5")
pub(crate) fn humanize(identifier: &str) -> String {
    identifier.replace('_', " ")
}
