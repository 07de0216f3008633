use crate::catalog::{Catalog, Keyed, PoiCatalog, WaypointCatalog};
use crate::model::{Poi, Waypoint};
use std::fmt::Write;

/// A record that knows how to render itself as a JSON object. Implemented by
/// the two record types so the catalog renderer dispatches statically, one
/// monomorphization per catalog.
pub trait RenderJson {
    fn render(&self, out: &mut String);
}

impl RenderJson for Waypoint {
    fn render(&self, out: &mut String) {
        let _ = write!(
            out,
            "    {{\n      \"name\": \"{}\",\n      \"latitude\": {},\n      \"longitude\": {}\n    }}",
            self.name,
            fmt_number(self.latitude),
            fmt_number(self.longitude)
        );
    }
}

impl RenderJson for Poi {
    fn render(&self, out: &mut String) {
        let _ = write!(
            out,
            "    {{\n      \"name\": \"{}\",\n      \"latitude\": {},\n      \"longitude\": {},\n      \"type\": \"{}\",\n      \"description\": \"{}\"\n    }}",
            self.name,
            fmt_number(self.latitude),
            fmt_number(self.longitude),
            self.category,
            self.description
        );
    }
}

/// Renders both catalogs into one JSON document of the fixed shape
/// `{ "waypoints": [...], "pois": [...] }`.
///
/// Objects appear in the catalogs' name-sorted order and separators are only
/// written between entries, so the output never carries a dangling comma.
/// Fed back through the parser, the document reproduces the catalogs
/// exactly.
pub fn serialize(waypoints: &WaypointCatalog, pois: &PoiCatalog) -> String {
    let mut out = String::new();
    out.push_str("{\n  \"waypoints\": ");
    render_catalog(waypoints, &mut out);
    out.push_str(",\n  \"pois\": ");
    render_catalog(pois, &mut out);
    out.push_str("\n}\n");
    out
}

fn render_catalog<R: Keyed + RenderJson>(catalog: &Catalog<R>, out: &mut String) {
    if catalog.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    let mut first = true;
    for (_, record) in catalog.iter() {
        out.push_str(if first { "\n" } else { ",\n" });
        first = false;
        record.render(out);
    }
    out.push_str("\n  ]");
}

/// Locale-independent decimal rendering. Rust's `Display` for `f64` emits
/// the shortest string that round-trips, so `10` stays `10` and full
/// precision is preserved.
fn fmt_number(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PoiCategory;

    fn sample_catalogs() -> (WaypointCatalog, PoiCatalog) {
        let mut waypoints = WaypointCatalog::new();
        waypoints.insert(Waypoint::new("Berlin", 52.52, 13.405).unwrap());
        waypoints.insert(Waypoint::new("Amsterdam", 52.37, 4.89).unwrap());
        let mut pois = PoiCatalog::new();
        pois.insert(
            Poi::new(
                PoiCategory::Restaurant,
                "Mensa HDA",
                "good and cheap",
                49.86,
                8.64,
            )
            .unwrap(),
        );
        (waypoints, pois)
    }

    #[test]
    fn test_document_shape() {
        let (waypoints, pois) = sample_catalogs();
        let text = serialize(&waypoints, &pois);
        assert!(text.starts_with("{\n  \"waypoints\": ["));
        assert!(text.contains("\"pois\": ["));
        assert!(text.trim_end().ends_with('}'));
        assert!(text.contains("\"type\": \"RESTAURANT\""));
        assert!(text.contains("\"description\": \"good and cheap\""));
    }

    #[test]
    fn test_entries_are_name_sorted() {
        let (waypoints, pois) = sample_catalogs();
        let text = serialize(&waypoints, &pois);
        let amsterdam = text.find("Amsterdam").unwrap();
        let berlin = text.find("Berlin").unwrap();
        assert!(amsterdam < berlin);
    }

    #[test]
    fn test_no_dangling_comma() {
        let mut waypoints = WaypointCatalog::new();
        waypoints.insert(Waypoint::new("Solo", 1.0, 2.0).unwrap());
        let pois = PoiCatalog::new();
        let text = serialize(&waypoints, &pois);
        assert!(!text.contains(",\n  ]"));
        assert!(!text.contains(",]"));
        assert!(text.contains("\"pois\": []"));
    }

    #[test]
    fn test_empty_catalogs() {
        let text = serialize(&WaypointCatalog::new(), &PoiCatalog::new());
        assert_eq!(text, "{\n  \"waypoints\": [],\n  \"pois\": []\n}\n");
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(fmt_number(10.0), "10");
        assert_eq!(fmt_number(-0.5), "-0.5");
        assert_eq!(fmt_number(52.52), "52.52");
        assert_eq!(fmt_number(-180.0), "-180");
    }
}
