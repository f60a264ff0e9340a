// params.rs - URL Query Parameter Extraction and Rewriting
// Purpose: Decompose a target URL into its query parameters and rebuild it
// with one parameter's value swapped for an injection payload.

use url::Url;

/// Extract the query parameters of a URL as (name, value) pairs, in
/// document order.
///
/// Known limitation: for repeated parameter names only the first value is
/// kept; later occurrences are dropped. A URL without a query component
/// yields an empty vec, which the orchestrator treats as "no tasks".
pub fn extract_params(raw_url: &str) -> Result<Vec<(String, String)>, url::ParseError> {
    let parsed = Url::parse(raw_url)?;

    let mut params: Vec<(String, String)> = Vec::new();
    for (name, value) in parsed.query_pairs() {
        if !params.iter().any(|(n, _)| *n == name) {
            params.push((name.into_owned(), value.into_owned()));
        }
    }
    Ok(params)
}

/// Rebuild a URL with `param`'s value replaced by `payload`.
///
/// Every other query pair, plus scheme/host/path, is preserved verbatim;
/// the payload is form-encoded by the serializer. Duplicate occurrences of
/// `param` collapse into the single rewritten pair, mirroring the
/// first-value-wins rule in [`extract_params`].
pub fn build_payload_url(
    raw_url: &str,
    param: &str,
    payload: &str,
) -> Result<String, url::ParseError> {
    let parsed = Url::parse(raw_url)?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (name, value) in parsed.query_pairs() {
        if name == param {
            if !replaced {
                pairs.push((name.into_owned(), payload.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((name.into_owned(), value.into_owned()));
        }
    }
    if !replaced {
        pairs.push((param.to_string(), payload.to_string()));
    }

    let mut rewritten = parsed;
    rewritten.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(rewritten.into())
}
