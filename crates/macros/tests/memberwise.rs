use std::collections::HashMap;

use memberwise_macros::memberwise_init;

#[memberwise_init]
#[derive(Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

#[test]
fn every_field_is_a_parameter() {
    assert_eq!(Point::new(1.0, 2.0), Point { x: 1.0, y: 2.0 });
}

#[memberwise_init(exclude = ["retries"], defaults = { "port": 8080 })]
#[derive(Debug)]
pub struct Client {
    host: String,
    port: u16,
    #[member(init = 3)]
    retries: _,
}

#[test]
fn excluded_members_use_their_initial_value() {
    let client = Client::new("localhost".to_string(), Some(9000));
    assert_eq!(client.host, "localhost");
    assert_eq!(client.port, 9000);
    assert_eq!(client.retries, 3);
    let _: i32 = client.retries;
}

#[test]
fn defaults_apply_when_nothing_is_passed() {
    let client = Client::new("localhost".to_string(), None);
    assert_eq!(client.port, 8080);
}

#[memberwise_init(access = internal)]
pub struct Profile {
    #[member(init = "guest")]
    name: _,
    #[member(constant, init = [1u8, 2, 3])]
    version: _,
    #[member(init = { "en": 1.0 })]
    weights: _,
    #[member(init = [1, None])]
    slots: _,
}

#[test]
fn placeholder_types_are_inferred() {
    let profile = Profile::new(
        "admin".to_string(),
        std::collections::HashMap::new(),
        vec![None],
    );
    let name: &String = &profile.name;
    let version: &Vec<u8> = &profile.version;
    assert_eq!(name, "admin");
    assert_eq!(*version, vec![1u8, 2, 3]);
    assert!(profile.weights.is_empty());
    assert_eq!(profile.slots, vec![None]);
}

#[memberwise_init]
pub struct Circle {
    #[member(static, init = "circle")]
    pub kind: _,
    radius: f64,
    #[member(computed = self.radius * 2.0)]
    pub diameter: f64,
}

#[test]
fn static_and_computed_members_become_functions() {
    let circle = Circle::new(1.5);
    assert_eq!(Circle::kind(), "circle");
    assert_eq!(circle.diameter(), 3.0);
}

#[memberwise_init(defaults = { "on_event": None })]
pub struct Handler {
    callback: Box<dyn Fn(i32) -> i32>,
    on_event: Option<String>,
}

#[test]
fn boxed_callables_are_taken_by_value() {
    let handler = Handler::new(|x| x + 1, None);
    assert_eq!((handler.callback)(1), 2);
    assert_eq!(handler.on_event, None);
}

#[memberwise_init]
pub struct Pair<T: Clone> {
    first: T,
    second: T,
}

#[test]
fn generic_hosts() {
    let pair = Pair::new("a", "b");
    assert_eq!((pair.first, pair.second), ("a", "b"));
}

#[memberwise_init]
pub struct Marker;

#[test]
fn unit_structs_get_an_empty_constructor() {
    let Marker = Marker::new();
}

mod nested {
    use memberwise_macros::memberwise_init;

    #[memberwise_init(access = internal)]
    pub(crate) struct Token {
        pub(crate) value: u32,
    }
}

#[test]
fn internal_hosts_with_internal_access() {
    assert_eq!(nested::Token::new(7).value, 7);
}

#[memberwise_init(exclude = ["limits"], defaults = { "label": "x" })]
pub struct Listener {
    #[member(constant, init = [80, 443])]
    ports: Vec<u16>,
    #[member(init = {"burst": 10})]
    limits: HashMap<String, u32>,
    label: Option<String>,
    #[member(static, init = ["a", "b"])]
    pub tags: Vec<String>,
}

#[test]
fn written_container_types_are_initialized() {
    let listener = Listener::new(None);
    assert_eq!(listener.ports, vec![80, 443]);
    assert_eq!(listener.limits.get("burst"), Some(&10));
    assert_eq!(Listener::tags(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn written_optional_defaults_are_wrapped() {
    assert_eq!(Listener::new(None).label, Some("x".to_string()));
    assert_eq!(Listener::new(Some(None)).label, None);
}
