//! Integration tests for decoding through the QueryRecord derive macro.
//!
//! These tests drive the full path: query string, derived field table,
//! option resolution, tokenizing and coercion.

#![cfg(feature = "derive")]
#![allow(dead_code)] // Some fields are intentionally skipped for testing

use std::any::Any;

use qparams::{
    decode, DecodeConfig, DecodeError, Decoder, Map, QueryParams, QueryRecord, Registry, Slice,
    UnmatchedFilters,
};

fn params(url: &str) -> QueryParams {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
    QueryParams::from_query_str(query)
}

fn slice(values: &[&str]) -> Slice {
    values.iter().copied().collect()
}

fn map(entries: &[(&str, &str)]) -> Map {
    entries.iter().copied().collect()
}

// =============================================================================
// List fields
// =============================================================================

#[derive(Debug, Default, PartialEq, QueryRecord)]
struct Embeds {
    embed: Slice,
}

#[test]
fn test_list_default_separator() {
    let cases: &[(&str, &[&str])] = &[
        ("x?embed=User,Order,Discount", &["user", "order", "discount"]),
        ("x?Embed=User,Order,Discount", &["user", "order", "discount"]),
        ("x?embed=User,Order,", &["user", "order"]),
        ("x?Embed=,User,Order,", &["user", "order"]),
    ];

    for &(url, expected) in cases {
        let mut opts = Embeds::default();
        decode(&mut opts, &params(url)).unwrap();
        assert_eq!(opts.embed, slice(expected), "{}", url);
    }
}

#[derive(Debug, Default, PartialEq, QueryRecord)]
struct PipeEmbeds {
    #[qparams("sep:|")]
    embed: Slice,
}

#[test]
fn test_list_custom_separator() {
    let cases: &[(&str, &[&str])] = &[
        ("x?embed=User|Order|Discount", &["user", "order", "discount"]),
        ("x?Embed=User|Order|Discount", &["user", "order", "discount"]),
        ("x?embed=User|Order|", &["user", "order"]),
        ("x?Embed=|User|Order|", &["user", "order"]),
        ("x?Embed=", &[]),
    ];

    for &(url, expected) in cases {
        let mut opts = PipeEmbeds::default();
        decode(&mut opts, &params(url)).unwrap();
        assert_eq!(opts.embed, slice(expected), "{}", url);
    }
}

#[test]
fn test_empty_list_value_is_zero_value() {
    let mut opts = PipeEmbeds::default();
    assert_eq!(decode(&mut opts, &params("foobar.com?Embed=")), Ok(()));
    assert_eq!(opts, PipeEmbeds::default());
}

// =============================================================================
// Map fields
// =============================================================================

#[derive(Debug, Default, PartialEq, QueryRecord)]
struct Filters {
    #[qparams("ops:>,==,<=,<,!=,-like-")]
    filter: Map,
}

#[test]
fn test_map_default_separator() {
    let cases: &[(&str, &[(&str, &str)])] = &[
        (
            "x?filter=age>7,gender==0,balance<=1000",
            &[("age >", "7"), ("gender ==", "0"), ("balance <=", "1000")],
        ),
        (
            "x?filter=age>8,gender==1,balance<100",
            &[("age >", "8"), ("gender ==", "1"), ("balance <", "100")],
        ),
        (
            "x?filter=Age>8,Gender==1,Balance<100",
            &[("age >", "8"), ("gender ==", "1"), ("balance <", "100")],
        ),
        (
            "x?filter=,Age>8,Gender==1,Balance<100,",
            &[("age >", "8"), ("gender ==", "1"), ("balance <", "100")],
        ),
        (
            "x?filter=aGe!=9,Gender>0,Lastname-like-Doe",
            &[
                ("age !=", "9"),
                ("gender >", "0"),
                ("lastname -like-", "Doe"),
            ],
        ),
    ];

    for &(url, expected) in cases {
        let mut opts = Filters::default();
        decode(&mut opts, &params(url)).unwrap();
        assert_eq!(opts.filter, map(expected), "{}", url);
    }
}

#[derive(Debug, Default, PartialEq, QueryRecord)]
struct PipeFilters {
    #[qparams("sep:| ops:>,==,<=,<,!=,-like-")]
    filter: Map,
}

#[test]
fn test_map_custom_separator() {
    let cases: &[(&str, &[(&str, &str)])] = &[
        (
            "x?filter=age>7|gender==0|balance<=1000",
            &[("age >", "7"), ("gender ==", "0"), ("balance <=", "1000")],
        ),
        (
            "x?filter=Age>8|Gender==1|Balance<100",
            &[("age >", "8"), ("gender ==", "1"), ("balance <", "100")],
        ),
        (
            "x?filter=|Age>8|Gender==1|Balance<100|",
            &[("age >", "8"), ("gender ==", "1"), ("balance <", "100")],
        ),
        (
            "x?filter=aGe!=9|Gender>0|Lastname-like-Doe",
            &[
                ("age !=", "9"),
                ("gender >", "0"),
                ("lastname -like-", "Doe"),
            ],
        ),
    ];

    for &(url, expected) in cases {
        let mut opts = PipeFilters::default();
        decode(&mut opts, &params(url)).unwrap();
        assert_eq!(opts.filter, map(expected), "{}", url);
    }
}

#[test]
fn test_map_without_vocabulary_is_empty() {
    #[derive(Debug, Default, QueryRecord)]
    struct NoOps {
        filter: Map,
    }

    let mut opts = NoOps::default();
    decode(&mut opts, &params("x?filter=age>7")).unwrap();
    assert!(opts.filter.is_empty());
}

#[test]
fn test_optional_containers_initialize_when_matched() {
    #[derive(Debug, Default, QueryRecord)]
    struct Optional {
        embed: Option<Slice>,
        #[qparams("ops:>")]
        filter: Option<Map>,
    }

    let mut opts = Optional::default();
    decode(&mut opts, &params("x?embed=,&filter=")).unwrap();
    assert_eq!(opts.embed, Some(Slice::new()));
    assert_eq!(opts.filter, Some(Map::new()));

    let mut opts = Optional::default();
    decode(&mut opts, &params("x?other=1")).unwrap();
    assert_eq!(opts.embed, None);
    assert_eq!(opts.filter, None);
}

// =============================================================================
// Scalar fields
// =============================================================================

#[derive(Debug, Default, PartialEq, QueryRecord)]
struct Scalars {
    page: i32,
    offset: i64,
    ratio: f32,
    balance: f64,
    q: String,
    #[qparams("name:per_page")]
    limit: Option<i64>,
    #[qparams(skip)]
    internal: i32,
}

#[test]
fn test_scalars_decode() {
    let mut query = params("x?Page=2&offset=9000000000&ratio=0.5&q=Mixed+Case");
    query.append("balance", "-12.25");
    query.append("PER_PAGE", "25");
    query.append("internal", "7");

    let mut opts = Scalars::default();
    decode(&mut opts, &query).unwrap();

    assert_eq!(
        opts,
        Scalars {
            page: 2,
            offset: 9_000_000_000,
            ratio: 0.5,
            balance: -12.25,
            q: "Mixed Case".to_string(),
            limit: Some(25),
            internal: 0,
        }
    );
}

#[test]
fn test_scalar_errors_are_independent() {
    let mut opts = Scalars::default();
    let err = decode(&mut opts, &params("x?page=two&q=hello&ratio=fast")).unwrap_err();

    assert_eq!(opts.q, "hello");
    assert_eq!(opts.page, 0);
    let messages = err.conversion_errors().unwrap().messages().to_vec();
    assert_eq!(
        messages,
        vec![
            "Field page does not contain a valid integer (two)",
            "Field ratio does not contain a valid float (fast)",
        ]
    );
}

#[test]
fn test_single_bad_field_yields_single_message() {
    #[derive(Debug, Default, QueryRecord)]
    struct Pair {
        count: i32,
        label: String,
    }

    let mut opts = Pair::default();
    let err = decode(&mut opts, &params("x?count=abc&label=ok")).unwrap_err();

    assert_eq!(err.conversion_errors().map(|e| e.len()), Some(1));
    assert_eq!(opts.label, "ok");
}

#[test]
fn test_failed_optional_scalar_stays_none() {
    let mut opts = Scalars::default();
    let result = decode(&mut opts, &params("x?per_page=lots"));
    assert!(result.is_err());
    assert_eq!(opts.limit, None);
}

#[test]
fn test_nothing_matched_is_ok() {
    let mut opts = Scalars::default();
    assert_eq!(decode(&mut opts, &params("x?unrelated=1")), Ok(()));
    assert_eq!(opts, Scalars::default());
}

// =============================================================================
// Whole-pass behavior
// =============================================================================

#[derive(Debug, Default, PartialEq, QueryRecord)]
struct Everything {
    embed: Slice,
    #[qparams("ops:>,==,<=,<,!=,-like-")]
    filter: Map,
    page: i32,
}

#[test]
fn test_decoding_twice_is_idempotent() {
    let query = params("x?Embed=User,Order&filter=age>7,Lastname-like-Doe&page=3");

    let mut first = Everything::default();
    let mut second = Everything::default();
    decode(&mut first, &query).unwrap();
    decode(&mut second, &query).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_from_url() {
    let url = url::Url::parse("https://foobar.com/users?Embed=User,Order&page=4").unwrap();

    let mut opts = Everything::default();
    decode(&mut opts, &QueryParams::from_url(&url)).unwrap();
    assert_eq!(opts.embed, slice(&["user", "order"]));
    assert_eq!(opts.page, 4);
}

#[test]
fn test_custom_default_separator() {
    let decoder = Decoder::new(DecodeConfig::new().separator(";"));

    let mut opts = Everything::default();
    decoder
        .decode(&mut opts, &params("x?embed=a;b&filter=age>1;name==x"))
        .unwrap();

    assert_eq!(opts.embed, slice(&["a", "b"]));
    assert_eq!(opts.filter, map(&[("age >", "1"), ("name ==", "x")]));
}

#[test]
fn test_unmatched_filter_report_policy() {
    let report = UnmatchedFilters::Report;
    let decoder = Decoder::new(DecodeConfig::new().unmatched_filters(report));

    let mut opts = Everything::default();
    let err = decoder
        .decode(&mut opts, &params("x?filter=age>7,garbage&page=1"))
        .unwrap_err();

    assert_eq!(opts.filter, map(&[("age >", "7")]));
    assert_eq!(opts.page, 1);
    assert_eq!(
        err.to_string(),
        "Filter filter has no known operator in (garbage)\n"
    );
}

#[test]
fn test_registry_rejects_wrong_destination() {
    let mut registry = Registry::default();
    registry.register::<Everything>();

    let query = params("x?embed=a");
    for dest in [
        &mut () as &mut dyn Any,
        &mut 5i32 as &mut dyn Any,
        &mut Embeds::default() as &mut dyn Any,
    ] {
        let result = registry.decode(dest, &query);
        assert_eq!(result, Err(DecodeError::WrongDestType));
    }

    let mut opts = Everything::default();
    registry.decode(&mut opts, &query).unwrap();
    assert_eq!(opts.embed, slice(&["a"]));
}

#[test]
fn test_schema_exposes_resolved_fields() {
    let schema = Decoder::default().schema::<Scalars>();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();

    let expected = ["page", "offset", "ratio", "balance", "q", "per_page"];
    assert_eq!(names, expected);
}

#[test]
fn test_resolved_schema_is_reusable() {
    let decoder = Decoder::default();
    let schema = decoder.schema::<Everything>();

    for page in ["1", "2", "3"] {
        let mut query = params("x?Embed=User,Order&filter=age>7");
        query.append("page", page);

        let mut reused = Everything::default();
        let mut fresh = Everything::default();
        decoder.decode_with(&schema, &mut reused, &query).unwrap();
        decoder.decode(&mut fresh, &query).unwrap();

        assert_eq!(reused, fresh);
        assert_eq!(reused.page.to_string(), page);
    }
}
