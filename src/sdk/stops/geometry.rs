use serde_json::Value;

/// (longitude, latitude)
pub type Coord = (f64, f64);

/// The geometry shapes a stop can be read from.
#[derive(Debug, Clone, PartialEq)]
pub enum StopGeometry {
    Point(Coord),
    /// A `MultiPoint`, or any geometry whose coordinates are a list of pairs.
    MultiPoint(Vec<Coord>),
    Unrecognized,
}

impl StopGeometry {
    pub fn from_value(geometry: Option<&Value>) -> Self {
        let Some(Value::Object(geometry)) = geometry else {
            return StopGeometry::Unrecognized;
        };
        let Some(coords) = geometry.get("coordinates") else {
            return StopGeometry::Unrecognized;
        };

        if geometry.get("type").and_then(Value::as_str) == Some("Point") {
            if let Some(coord) = coord_pair(coords) {
                return StopGeometry::Point(coord);
            }
        }

        // MultiPoint and any other list-of-pairs shape are decided by the first element.
        let points: Vec<Coord> = match coords.as_array() {
            Some(items) => items.iter().map_while(coord_pair).collect(),
            None => Vec::new(),
        };
        if points.is_empty() {
            StopGeometry::Unrecognized
        } else {
            StopGeometry::MultiPoint(points)
        }
    }

    /// The single point a stop is reduced to. A multi-point keeps only its first pair.
    pub fn representative(&self) -> Option<Coord> {
        match self {
            StopGeometry::Point(coord) => Some(*coord),
            StopGeometry::MultiPoint(points) => points.first().copied(),
            StopGeometry::Unrecognized => None,
        }
    }
}

/// Shorthand for `StopGeometry::from_value(..).representative()`.
pub fn normalize_coords(geometry: Option<&Value>) -> Option<Coord> {
    StopGeometry::from_value(geometry).representative()
}

fn coord_pair(value: &Value) -> Option<Coord> {
    let items = value.as_array()?;
    if items.len() < 2 {
        return None;
    }
    Some((number(&items[0])?, number(&items[1])?))
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
