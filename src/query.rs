//! Canonical query-string construction for listing fetches.

use hashbrown::HashMap;
use url::form_urlencoded;

/// Current filter values, keyed by field name. Rebuilt in full from the live
/// filter region on every read; never patched incrementally.
pub type FilterMap = HashMap<String, String>;

/// Merges filters, extra parameters and the requested page into one
/// url-encoded query string.
///
/// Extra parameters override filter values on key collision, and entries with
/// empty keys or values are excluded afterwards. `page` always wins over any
/// entry of the same name. Pair ordering is unspecified; the set of pairs is
/// deterministic for identical inputs.
#[must_use]
pub fn build_query(filters: &FilterMap, page: u32, extra: &[(String, String)]) -> String {
	let mut merged: FilterMap = filters.clone();
	for (key, value) in extra {
		merged.insert(key.clone(), value.clone());
	}
	merged.remove("page");

	let mut serializer = form_urlencoded::Serializer::new(String::new());
	for (key, value) in &merged {
		if key.is_empty() || value.is_empty() {
			continue;
		}
		serializer.append_pair(key, value);
	}
	serializer.append_pair("page", &page.to_string());
	serializer.finish()
}

/// Appends `query` to `base`, picking `?` or `&` depending on whether the base
/// endpoint already carries a query string.
#[must_use]
pub fn append_query(base: &str, query: &str) -> String {
	if query.is_empty() {
		return base.to_owned();
	}
	let separator = if base.contains('?') { '&' } else { '?' };
	format!("{}{}{}", base, separator, query)
}
