mod util;

use std::rc::Rc;
use trellis_dom::{Listing, ListingOptions};
use util::{fire, mount, sleep, MockTransport};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

const EMPTY_PAGE: &str = r#"{"data":[],"meta":{"current_page":1,"last_page":1,"links":[]}}"#;

fn text_input(fixture: &util::Fixture, name: &str) -> HtmlInputElement {
	let input: HtmlInputElement = util::document().create_element("input").unwrap().dyn_into().unwrap();
	input.set_attribute("name", name).unwrap();
	fixture.filter.append_child(&input).unwrap();
	input
}

#[wasm_bindgen_test]
async fn text_changes_coalesce_into_one_debounced_fetch() {
	util::init_logging();
	let fixture = mount();
	let input = text_input(&fixture, "status");
	let transport = MockTransport::ok(EMPTY_PAGE);

	let _listing = Listing::new(
		ListingOptions::new("/api/people", fixture.container.clone())
			.filter(fixture.filter.clone())
			.debounce_ms(80)
			.fetcher(Rc::clone(&transport) as Rc<dyn trellis_dom::transport::Transport>),
	)
	.unwrap();

	// Three keystrokes inside the quiet window must reset the timer, not
	// stack up fetches.
	for value in ["a", "ac", "active"] {
		input.set_value(value);
		fire(&input, "input");
		sleep(30).await;
	}
	assert_eq!(transport.request_count(), 0);

	sleep(200).await;

	assert_eq!(transport.request_count(), 1);
	let url = transport.last_url().unwrap();
	assert!(url.contains("status=active"));
	assert!(url.contains("page=1"));
}

#[wasm_bindgen_test]
async fn select_changes_fetch_immediately() {
	let fixture = mount();
	let select: HtmlSelectElement = util::document().create_element("select").unwrap().dyn_into().unwrap();
	select.set_attribute("name", "city").unwrap();
	select.set_inner_html("<option value=\"\">Any</option><option value=\"riga\">Riga</option>");
	fixture.filter.append_child(&select).unwrap();
	let transport = MockTransport::ok(EMPTY_PAGE);

	let _listing = Listing::new(
		ListingOptions::new("/api/people", fixture.container.clone())
			.filter(fixture.filter.clone())
			.fetcher(Rc::clone(&transport) as Rc<dyn trellis_dom::transport::Transport>),
	)
	.unwrap();

	select.set_value("riga");
	fire(&select, "change");
	sleep(20).await;

	assert_eq!(transport.request_count(), 1);
	let url = transport.last_url().unwrap();
	assert!(url.contains("city=riga"));
	assert!(url.contains("page=1"));
}

#[wasm_bindgen_test]
async fn filter_change_resets_to_page_one() {
	let fixture = mount();
	let input = text_input(&fixture, "q");
	let transport = MockTransport::ok(
		r#"{"data":[{"html":"<p>x</p>"}],"meta":{"current_page":3,"last_page":5,"links":[]}}"#,
	);

	let listing = Listing::new(
		ListingOptions::new("/api/people", fixture.container.clone())
			.filter(fixture.filter.clone())
			.debounce_ms(40)
			.fetcher(Rc::clone(&transport) as Rc<dyn trellis_dom::transport::Transport>),
	)
	.unwrap();

	listing.fetch(3);
	sleep(20).await;
	assert!(transport.last_url().unwrap().contains("page=3"));

	input.set_value("ann");
	fire(&input, "input");
	sleep(120).await;

	assert_eq!(transport.request_count(), 2);
	let url = transport.last_url().unwrap();
	assert!(url.contains("page=1"));
	assert!(url.contains("q=ann"));
}

#[wasm_bindgen_test]
async fn unnamed_and_empty_fields_stay_out_of_the_query() {
	let fixture = mount();
	let named = text_input(&fixture, "kept");
	let blank = text_input(&fixture, "blank");
	let unnamed: HtmlInputElement = util::document().create_element("input").unwrap().dyn_into().unwrap();
	unnamed.set_value("ignored");
	fixture.filter.append_child(&unnamed).unwrap();
	let transport = MockTransport::ok(EMPTY_PAGE);

	let _listing = Listing::new(
		ListingOptions::new("/api/people", fixture.container.clone())
			.filter(fixture.filter.clone())
			.debounce_ms(40)
			.fetcher(Rc::clone(&transport) as Rc<dyn trellis_dom::transport::Transport>),
	)
	.unwrap();

	named.set_value("yes");
	blank.set_value("");
	fire(&named, "input");
	sleep(120).await;

	assert_eq!(transport.request_count(), 1);
	let url = transport.last_url().unwrap();
	assert!(url.contains("kept=yes"));
	assert!(!url.contains("blank="));
	assert!(!url.contains("ignored"));
}

#[wasm_bindgen_test]
async fn fields_added_after_construction_are_read() {
	let fixture = mount();
	let transport = MockTransport::ok(EMPTY_PAGE);

	let listing = Listing::new(
		ListingOptions::new("/api/people", fixture.container.clone())
			.filter(fixture.filter.clone())
			.fetcher(Rc::clone(&transport) as Rc<dyn trellis_dom::transport::Transport>),
	)
	.unwrap();

	// The filter region is re-queried on every read, not cached.
	let late = text_input(&fixture, "late");
	late.set_value("bird");

	listing.fetch(1);
	sleep(20).await;

	assert!(transport.last_url().unwrap().contains("late=bird"));
}
