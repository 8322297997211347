//! FIP version extraction.

use sophia_api::dataset::Dataset;
use sophia_api::ns::rdf;
use sophia_api::quad::{Quad, Spog};
use sophia_api::source::QuadSource;
use sophia_api::term::matcher::Any;
use sophia_api::term::{IriRef, SimpleTerm, Term};
use sophia_turtle::parser::trig;
use tracing::debug;

use fip_action_core::error::AppError;
use fip_action_core::result::AppResult;

/// `rdf:type` object identifying a FAIR Implementation Profile.
pub const FIP_TYPE_IRI: &str = "https://w3id.org/fair/fip/terms/FAIR-Implementation-Profile";

/// Property carrying the profile version.
pub const SCHEMA_VERSION_IRI: &str = "https://schema.org/version";

type QuadList = Vec<Spog<SimpleTerm<'static>>>;

/// Extract the FIP version from TriG content.
///
/// Subjects typed as [`FIP_TYPE_IRI`] are visited in document order; the
/// first one carrying a [`SCHEMA_VERSION_IRI`] value wins. Returns `Ok(None)`
/// when no such pair exists and an `Rdf` error when the content is not
/// valid TriG.
pub fn extract_version(content: &str) -> AppResult<Option<String>> {
    let quads: QuadList = trig::parse_str(content)
        .collect_quads()
        .map_err(|e| AppError::rdf(format!("Failed to parse TriG: {e}")))?;

    let fip_type = IriRef::new_unchecked(FIP_TYPE_IRI);
    for typed in quads
        .quads_matching(Any, [rdf::type_], [fip_type], Any)
        .filter_map(Result::ok)
    {
        let subject: SimpleTerm<'static> = typed.s().into_term();
        let version = quads
            .quads_matching(
                [subject],
                [IriRef::new_unchecked(SCHEMA_VERSION_IRI)],
                Any,
                Any,
            )
            .filter_map(Result::ok)
            .find_map(|q| object_value(q.o()));
        if version.is_some() {
            return Ok(version);
        }
    }

    Ok(None)
}

/// Like [`extract_version`], but treats unparsable content as "no version".
pub fn extract_version_lenient(content: &str) -> Option<String> {
    match extract_version(content) {
        Ok(version) => version,
        Err(e) => {
            debug!(error = %e.message, "Ignoring unparsable nanopublication");
            None
        }
    }
}

/// Literal lexical form, or the IRI text when the version is an IRI.
fn object_value<T: Term>(term: T) -> Option<String> {
    if let Some(lexical) = term.lexical_form() {
        return Some(lexical.to_string());
    }
    term.iri().map(|iri| iri.as_str().to_string())
}
