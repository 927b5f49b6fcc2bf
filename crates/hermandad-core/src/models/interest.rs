use serde::{Deserialize, Serialize};

/// The one area every member belongs to. It is injected into every
/// subscription set, cannot be toggled off and sorts first in display
/// order.
pub const MANDATORY_AREA: &str = "HERMANOS";

/// A named communication channel, as returned by `GET /api/areas-interes/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestArea {
    pub id: i64,
    #[serde(rename = "nombre_area")]
    pub name: String,
    #[serde(default)]
    pub telegram_invite_link: Option<String>,
}

/// Display metadata for an interest area, resolved from a static lookup
/// keyed by area name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaInfo {
    pub icon: &'static str,
    pub title: String,
    pub description: String,
}

/// Resolve display metadata for an area key. Server-provided areas with
/// no local mapping fall back to their raw name and an empty description.
pub fn area_info(key: &str) -> AreaInfo {
    let (icon, title, description) = match key {
        MANDATORY_AREA => (
            "people",
            "Hermanos",
            "Comunicaciones generales para todos los hermanos",
        ),
        "CARIDAD" => (
            "heart",
            "Caridad",
            "Obra social y acción caritativa de la hermandad",
        ),
        "JUVENTUD" => (
            "star",
            "Juventud",
            "Grupo joven y actividades de formación juvenil",
        ),
        "LITURGIA" => (
            "book",
            "Liturgia",
            "Cultos, celebraciones y vida litúrgica",
        ),
        "FORMACION" => (
            "school",
            "Formación",
            "Charlas, convivencias y formación de hermanos",
        ),
        "COSTALEROS" => (
            "fitness",
            "Costaleros",
            "Cuadrillas de costaleros y ensayos",
        ),
        _ => return AreaInfo {
            icon: "tag",
            title: key.to_string(),
            description: String::new(),
        },
    };
    AreaInfo {
        icon,
        title: title.to_string(),
        description: description.to_string(),
    }
}

/// Sort a catalog for display: the mandatory area first, the rest by name.
pub fn sort_areas(areas: &mut [InterestArea]) {
    areas.sort_by(|a, b| {
        let a_mandatory = a.name == MANDATORY_AREA;
        let b_mandatory = b.name == MANDATORY_AREA;
        b_mandatory.cmp(&a_mandatory).then_with(|| a.name.cmp(&b.name))
    });
}
