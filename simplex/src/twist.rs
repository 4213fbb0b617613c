//! The `.twist` dump format: a structured, indented,
//! deterministic human-readable rendering for values that are neither
//! solids nor flat text — records, vectors, bounding boxes/rects, and
//! anything else the product body returns.

use std::fmt::Write as _;

use crate::value::Value;

/// Renders `values` as a top-level `.twist` document: one entry per value,
/// in product order.
pub fn render(values: &[Value]) -> String {
    let mut out = String::new();
    for value in values {
        render_value(value, 0, &mut out);
        out.push('\n');
    }
    out
}

fn indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn render_value(value: &Value, level: usize, out: &mut String) {
    match value {
        Value::Int(i) => { let _ = write!(out, "{i}"); }
        Value::Float(f) => { let _ = write!(out, "{f}"); }
        Value::Str(s) => { let _ = write!(out, "{s:?}"); }
        Value::Bool(b) => { let _ = write!(out, "{b}"); }
        Value::None => out.push_str("none"),
        Value::Vec2(v) => { let _ = write!(out, "[{}, {}]", v.x, v.y); }
        Value::Vec3(v) => { let _ = write!(out, "[{}, {}, {}]", v.x, v.y, v.z); }
        Value::Vector(items) => render_vector(items, level, out),
        Value::Record(r) => render_record(r, level, out),
        Value::BoundingBox(b) => {
            let _ = writeln!(out, "bounds = {{");
            indent(level + 1, out);
            let _ = writeln!(out, "low = [{}, {}, {}]", b.low.x, b.low.y, b.low.z);
            indent(level + 1, out);
            let _ = writeln!(out, "high = [{}, {}, {}]", b.high.x, b.high.y, b.high.z);
            indent(level, out);
            out.push('}');
        }
        Value::BoundingRect(b) => {
            let _ = writeln!(out, "bounds = {{");
            indent(level + 1, out);
            let _ = writeln!(out, "low = [{}, {}]", b.low.x, b.low.y);
            indent(level + 1, out);
            let _ = writeln!(out, "high = [{}, {}]", b.high.x, b.high.y);
            indent(level, out);
            out.push('}');
        }
        Value::Function(f) => { let _ = write!(out, "<function {}>", f.name); }
        Value::Method(m) => { let _ = write!(out, "<method {}>", m.name); }
        Value::Solid(_) => out.push_str("<solid>"),
        Value::Slice(_) => out.push_str("<slice>"),
        Value::Polygon(_) => out.push_str("<polygon>"),
    }
}

fn render_vector(items: &[Value], level: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render_value(item, level, out);
    }
    out.push(']');
}

fn render_record(record: &crate::value::record::DataRecord, level: usize, out: &mut String) {
    let _ = writeln!(out, "{} {{", record.type_name);
    for name in &record.field_names {
        if let Some(value) = record.get(name) {
            indent(level + 1, out);
            let _ = write!(out, "{name} = ");
            render_value(value, level + 1, out);
            out.push('\n');
        }
    }
    indent(level, out);
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::record::DataRecord;
    use std::rc::Rc;

    #[test]
    fn renders_flat_vector() {
        let values = vec![Value::Vector(Rc::new(vec![Value::Int(1), Value::Int(4), Value::Int(9)]))];
        assert_eq!(render(&values), "[1, 4, 9]\n");
    }

    #[test]
    fn renders_record_with_updated_field() {
        let record = Value::Record(Rc::new(DataRecord {
            type_name: "P".to_string(),
            field_names: vec!["x".to_string(), "y".to_string()],
            fields: vec![Value::Int(1), Value::Int(9)],
        }));
        let rendered = render(&[record]);
        assert!(rendered.contains("x = 1"));
        assert!(rendered.contains("y = 9"));
    }
}
