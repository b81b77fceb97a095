use super::BindValue;
use crate::db::search::predicate::Scalar;
use crate::db::search::schema::FieldKind;

pub(super) fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    bind_params.push(BindValue::Text(value));
    bind_params.len()
}

pub(super) fn push_text_array(bind_params: &mut Vec<BindValue>, value: Vec<String>) -> usize {
    bind_params.push(BindValue::TextArray(value));
    bind_params.len()
}

/// Bind one scalar; text for `Text` fields is lower-cased to pair with `lower(col)`.
pub(super) fn push_scalar(bind_params: &mut Vec<BindValue>, kind: FieldKind, value: &Scalar) -> usize {
    let bind = match value {
        Scalar::Text(s) if kind == FieldKind::Text => BindValue::Text(s.to_lowercase()),
        Scalar::Text(s) => BindValue::Text(s.clone()),
        Scalar::Bool(b) => BindValue::Bool(*b),
        Scalar::Integer(i) => BindValue::BigInt(*i),
        Scalar::Timestamp(ts) => BindValue::Timestamp(*ts),
    };
    bind_params.push(bind);
    bind_params.len()
}

/// Bind a homogeneous candidate list as one array parameter.
pub(super) fn push_scalar_array(
    bind_params: &mut Vec<BindValue>,
    kind: FieldKind,
    values: &[Scalar],
) -> usize {
    let bind = match kind {
        FieldKind::Text | FieldKind::Id | FieldKind::Code => BindValue::TextArray(
            values
                .iter()
                .filter_map(|v| match v {
                    Scalar::Text(s) if kind == FieldKind::Text => Some(s.to_lowercase()),
                    Scalar::Text(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
        ),
        FieldKind::Bool => BindValue::BoolArray(
            values
                .iter()
                .filter_map(|v| match v {
                    Scalar::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect(),
        ),
        FieldKind::Integer => BindValue::BigIntArray(
            values
                .iter()
                .filter_map(|v| match v {
                    Scalar::Integer(i) => Some(*i),
                    _ => None,
                })
                .collect(),
        ),
        FieldKind::Timestamp => BindValue::TimestampArray(
            values
                .iter()
                .filter_map(|v| match v {
                    Scalar::Timestamp(ts) => Some(*ts),
                    _ => None,
                })
                .collect(),
        ),
    };
    bind_params.push(bind);
    bind_params.len()
}
