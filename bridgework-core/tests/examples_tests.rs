//! Integration tests covering the exposed example surface end to end

use bridgework_core::prelude::*;

#[test]
fn test_scalar_examples() {
    assert_eq!(sum_ints(2, 3).unwrap(), 5);
    assert_eq!(sum_floats(2.5, 1.5), 4.0);
    assert_eq!(sqrt_num(9.0), 3.0);
    assert_eq!(generic_sum(1, 2), 3);
    assert_eq!(generic_sum("a".to_string(), "b".to_string()), "ab");
    assert_eq!(greet(), "Hello, world!");
}

#[test]
fn test_dynamic_sum_from_json_values() {
    let args: Vec<Value> = serde_json::from_str(r#"[1, 2, 2.5, "a", "b"]"#).unwrap();
    assert_eq!(dynamic_sum(&args[0], &args[1]).unwrap(), Value::Int(3));
    assert_eq!(dynamic_sum(&args[1], &args[2]).unwrap(), Value::Float(4.5));
    assert_eq!(dynamic_sum(&args[3], &args[4]).unwrap(), Value::from("ab"));
    assert!(dynamic_sum(&args[0], &args[3]).unwrap_err().is_invalid_input());
}

#[test]
fn test_container_demo_data() {
    let list: Vec<Value> = serde_json::from_str(
        r#"["aa", "bvbbb", 1, 3, 1.524, {"complex": [1.0, 4.0]}, [1, 1], 3]"#,
    )
    .unwrap();

    assert_eq!(
        type_names(&list).unwrap(),
        vec!["str", "str", "int", "int", "float", "complex", "list", "int"]
    );
    assert_eq!(get_int_list(&list), vec![1, 3, 3]);

    let nested: Vec<Value> =
        serde_json::from_str(r#"[[12, 1, "a", "3"], [100, 3], ["asdf", "ksdf"]]"#).unwrap();
    let flat = flatten_2d_list(&nested).unwrap();
    assert_eq!(flat.len(), 8);
    assert_eq!(flat[0], Value::Int(12));
    assert_eq!(flat[7], Value::from("ksdf"));

    let dict: Value =
        serde_json::from_str(r#"{"cat": "meow", "dog": "woof", "cow": "moo"}"#).unwrap();
    let mut out = Vec::new();
    iterate_dict(dict.as_dict().unwrap(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "cat: meow\ndog: woof\ncow: moo\n");
}

#[test]
fn test_int_filter_and_flatten() {
    let items = vec![
        Value::Int(1),
        Value::from("a"),
        Value::Int(2),
        Value::Float(3.5),
        Value::Int(3),
    ];
    assert_eq!(get_int_list(&items), vec![1, 2, 3]);

    let nested = vec![
        Value::list((1..=2).map(Value::Int)),
        Value::list([Value::Int(3)]),
        Value::list((4..=5).map(Value::Int)),
    ];
    let flat = flatten_2d_list(&nested).unwrap();
    assert_eq!(flat, (1..=5).map(Value::Int).collect::<Vec<_>>());
}

#[test]
fn test_point_properties() {
    let points = [
        Point3::new(0, 0, 0),
        Point3::new(1, -2, 3),
        Point3::new(-7, 4, 10),
    ];
    for p in &points {
        assert_eq!(p.distance(p), 0.0);
        for q in &points {
            assert_eq!(p.distance(q), q.distance(p));
            let sum = *p + *q;
            assert_eq!(sum.x(), p.x() + q.x());
            assert_eq!(sum.y(), p.y() + q.y());
            assert_eq!(sum.z(), p.z() + q.z());
        }
    }
}

#[test]
fn test_suppression_properties() {
    let constant = Grid::from_rows(vec![vec![2.5; 5]; 4]).unwrap();
    assert_eq!(non_max_suppression(&constant), constant);

    let mut peaked = Grid::from_rows(vec![vec![1.0; 6]; 6]).unwrap();
    for r in 0..6 {
        for c in 0..6 {
            peaked.set(r, c, (r * 6 + c) as f64 * 0.01);
        }
    }
    peaked.set(2, 3, 100.0);
    let out = non_max_suppression(&peaked);
    // The increasing ramp also peaks at its far corner, outside the spike's window.
    for r in 0..6 {
        for c in 0..6 {
            let expected = match (r, c) {
                (2, 3) => 100.0,
                (5, 5) => peaked.get(5, 5),
                _ => 0.0,
            };
            assert_eq!(out.get(r, c), expected, "cell ({}, {})", r, c);
        }
    }
}

#[test]
fn test_scale_space_from_config() {
    let config = ConfigBuilder::new()
        .scale_space(ScaleSpaceConfig {
            levels: 2,
            ..Default::default()
        })
        .build();
    let grid = Grid::from_rows(vec![vec![0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 0.0]])
        .unwrap();
    let levels = laplacian_scale_space(&grid, &config.scale_space).unwrap();
    assert_eq!(levels.len(), 2);
    assert!((levels[1].sigma - 1.2).abs() < 1e-12);
}
