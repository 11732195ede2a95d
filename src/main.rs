use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::fs;

use datatree::{Leaf, Palette, TreeRenderer, Value};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("datatree")
        .about("Visualize nested data structures as a colored tree")
        .arg(
            Arg::new("input")
                .help("JSON file to render; omit for the built-in demo")
                .index(1),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable ANSI styling"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_parser(clap::value_parser!(usize))
                .help("Fail on nesting deeper than this"),
        )
        .get_matches();

    let mut renderer = if matches.get_flag("no-color") {
        TreeRenderer::new().with_palette(Palette::plain())
    } else {
        TreeRenderer::new()
    };
    if let Some(limit) = matches.get_one::<usize>("max-depth") {
        renderer = renderer.with_max_depth(*limit);
    }

    let value = match matches.get_one::<String>("input") {
        Some(path) => {
            let json_content =
                fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
            let json: serde_json::Value = serde_json::from_str(&json_content)
                .with_context(|| format!("failed to parse {path} as JSON"))?;
            Value::from(json)
        }
        None => demo_value(),
    };

    renderer.render(&value)?;
    Ok(())
}

fn user(name: &str, age: i64) -> Value {
    Value::Leaf(Leaf::Opaque {
        type_name: "User".to_string(),
        repr: format!("User {{ name: {name:?}, age: {age} }}"),
    })
}

/// Sample structure exercising every node kind the renderer handles.
fn demo_value() -> Value {
    let ages = [28i64, 35, 42];
    let scores: Vec<Value> = ages.iter().map(|age| Value::from(*age as f64 * 1.5)).collect();
    let average = ages.iter().sum::<i64>() as f64 / ages.len() as f64;

    Value::map([
        (
            "metadata",
            Value::map([
                (
                    "created",
                    Value::Leaf(Leaf::Opaque {
                        type_name: "date".to_string(),
                        repr: "2023-05-15".to_string(),
                    }),
                ),
                ("author", Value::from("Test Suite")),
                ("version", Value::from(1.2)),
            ]),
        ),
        (
            "users",
            Value::list([user("Alice", 28), user("Bob", 35), user("Charlie", 42)]),
        ),
        (
            "calculations",
            Value::map([
                ("scores", Value::list(scores)),
                ("average", Value::from(average)),
            ]),
        ),
        (
            "data_types",
            Value::map([
                (
                    "primitives",
                    Value::map([
                        ("integer", Value::from(42)),
                        ("float", Value::from(3.14)),
                        ("string", Value::from("hello")),
                        ("boolean", Value::from(true)),
                        ("none", Value::null()),
                    ]),
                ),
                (
                    "collections",
                    Value::map([
                        (
                            "list",
                            Value::list([Value::from(1), Value::from(2), Value::from(3)]),
                        ),
                        (
                            "tuple",
                            Value::tuple([Value::from(4), Value::from(5), Value::from(6)]),
                        ),
                        (
                            "set",
                            Value::set([Value::from(7), Value::from(8), Value::from(9)]),
                        ),
                        (
                            "map",
                            Value::map([("a", Value::from(1)), ("b", Value::from(2))]),
                        ),
                    ]),
                ),
                (
                    "special",
                    Value::map([
                        ("binary", Value::Leaf(Leaf::Bytes(vec![0x01, 0x02, 0x03]))),
                        (
                            "function",
                            Value::Leaf(Leaf::Function("calculate_score".to_string())),
                        ),
                        ("class", Value::Leaf(Leaf::Class("User".to_string()))),
                        (
                            "exception",
                            Value::Leaf(Leaf::Error {
                                kind: "ValueError".to_string(),
                                message: "Sample error".to_string(),
                            }),
                        ),
                        (
                            "range",
                            Value::Leaf(Leaf::Opaque {
                                type_name: "range".to_string(),
                                repr: "0..5".to_string(),
                            }),
                        ),
                    ]),
                ),
            ]),
        ),
    ])
}
