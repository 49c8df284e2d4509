//! Turns server-supplied page-link metadata into a control plan.
//!
//! The plan is plain data; wiring it into buttons happens in the listing
//! widget. Keeping the two apart means label decoding, page extraction and
//! the single-page rule are all testable without a document.

use crate::envelope::PageMeta;
use url::form_urlencoded;

/// One pagination control to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageControl {
	/// An ellipsis placeholder; rendered disabled, never wired.
	Gap { label: String },
	/// A concrete page link. `page` is `None` when the descriptor carried no
	/// usable target URL; such controls render disabled.
	Page {
		label: String,
		page: Option<u32>,
		active: bool,
	},
}

/// Whether the metadata calls for visible pagination at all.
#[must_use]
pub fn is_multi_page(meta: &PageMeta) -> bool {
	meta.last_page > 1
}

/// Maps every link descriptor to a control, decoding encoded labels.
#[must_use]
pub fn plan_controls(meta: &PageMeta) -> Vec<PageControl> {
	meta.links
		.iter()
		.map(|link| {
			let label = decode_label(&link.label);
			if is_gap(&label) {
				PageControl::Gap { label }
			} else {
				PageControl::Page {
					label,
					page: link.url.as_deref().and_then(page_from_url),
					active: link.active,
				}
			}
		})
		.collect()
}

fn is_gap(label: &str) -> bool {
	matches!(label.trim(), "..." | "…")
}

/// Extracts the `page` query parameter from a link target. Works on relative
/// and absolute URLs alike.
#[must_use]
pub fn page_from_url(url: &str) -> Option<u32> {
	let (_, query) = url.split_once('?')?;
	let query = match query.split_once('#') {
		Some((query, _)) => query,
		None => query,
	};
	form_urlencoded::parse(query.as_bytes())
		.find(|(key, _)| key == "page")
		.and_then(|(_, value)| value.parse().ok())
}

/// Decodes the handful of HTML entities pagination labels actually carry
/// (guillemets, ellipsis, ampersand) plus numeric references. Unknown named
/// entities pass through verbatim.
#[must_use]
pub fn decode_label(raw: &str) -> String {
	let mut decoded = String::with_capacity(raw.len());
	let mut rest = raw;
	while let Some(start) = rest.find('&') {
		decoded.push_str(&rest[..start]);
		let tail = &rest[start..];
		match tail.find(';') {
			Some(end) => {
				match decode_entity(&tail[1..end]) {
					Some(character) => decoded.push(character),
					None => decoded.push_str(&tail[..=end]),
				}
				rest = &tail[end + 1..];
			}
			None => {
				decoded.push_str(tail);
				return decoded;
			}
		}
	}
	decoded.push_str(rest);
	decoded
}

fn decode_entity(entity: &str) -> Option<char> {
	Some(match entity {
		"laquo" => '\u{ab}',
		"raquo" => '\u{bb}',
		"lsaquo" => '\u{2039}',
		"rsaquo" => '\u{203a}',
		"hellip" => '\u{2026}',
		"nbsp" => ' ',
		"amp" => '&',
		"lt" => '<',
		"gt" => '>',
		"quot" => '"',
		_ => {
			let reference = entity.strip_prefix('#')?;
			let code = match reference.strip_prefix('x').or_else(|| reference.strip_prefix('X')) {
				Some(hex) => u32::from_str_radix(hex, 16).ok()?,
				None => reference.parse().ok()?,
			};
			char::from_u32(code)?
		}
	})
}

#[cfg(test)]
mod tests {
	use super::{decode_label, is_multi_page, page_from_url, plan_controls, PageControl};
	use crate::envelope::{PageLink, PageMeta};

	fn link(label: &str, url: Option<&str>, active: bool) -> PageLink {
		PageLink {
			label: label.to_owned(),
			url: url.map(str::to_owned),
			active,
		}
	}

	#[test]
	fn single_page_is_not_multi_page() {
		let meta = PageMeta {
			current_page: 1,
			last_page: 1,
			links: vec![link("1", Some("/items?page=1"), true)],
		};
		assert!(!is_multi_page(&meta));
	}

	#[test]
	fn plans_gap_active_and_disabled_controls() {
		let meta = PageMeta {
			current_page: 2,
			last_page: 9,
			links: vec![
				link("&laquo; Previous", Some("/items?page=1"), false),
				link("2", None, true),
				link("...", None, false),
				link("9", Some("/items?page=9"), false),
			],
		};

		let controls = plan_controls(&meta);
		assert_eq!(
			controls,
			vec![
				PageControl::Page {
					label: "\u{ab} Previous".to_owned(),
					page: Some(1),
					active: false,
				},
				PageControl::Page {
					label: "2".to_owned(),
					page: None,
					active: true,
				},
				PageControl::Gap { label: "...".to_owned() },
				PageControl::Page {
					label: "9".to_owned(),
					page: Some(9),
					active: false,
				},
			]
		);
	}

	#[test]
	fn extracts_page_from_relative_and_absolute_urls() {
		assert_eq!(page_from_url("/users?page=2"), Some(2));
		assert_eq!(page_from_url("https://example.test/users?status=a&page=17#top"), Some(17));
		assert_eq!(page_from_url("/users"), None);
		assert_eq!(page_from_url("/users?page=banana"), None);
	}

	#[test]
	fn decodes_common_entities() {
		assert_eq!(decode_label("&laquo; Previous"), "\u{ab} Previous");
		assert_eq!(decode_label("Next &raquo;"), "Next \u{bb}");
		assert_eq!(decode_label("&#171;&#xBB;"), "\u{ab}\u{bb}");
		assert_eq!(decode_label("A &amp; B"), "A & B");
	}

	#[test]
	fn unknown_entities_pass_through() {
		assert_eq!(decode_label("&bogus; &"), "&bogus; &");
	}

	#[test]
	fn unicode_ellipsis_is_a_gap() {
		let meta = PageMeta {
			current_page: 1,
			last_page: 3,
			links: vec![link("&hellip;", None, false)],
		};
		assert_eq!(plan_controls(&meta), vec![PageControl::Gap { label: "\u{2026}".to_owned() }]);
	}
}
