use chantier_core::models::Worksite;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

/// Worksites as a GeoJSON point layer, one feature per worksite
pub fn worksites_to_geojson(worksites: &[Worksite]) -> FeatureCollection {
    let features = worksites.iter().map(worksite_feature).collect();

    FeatureCollection { features, bbox: None, foreign_members: None }
}

fn worksite_feature(worksite: &Worksite) -> Feature {
    // GeoJSON positions are [lon, lat]
    let geometry = Geometry::new(Value::Point(vec![worksite.lon, worksite.lat]));

    let mut properties = JsonObject::new();
    properties.insert("status".to_string(), JsonValue::from(worksite.status.to_string()));
    properties.insert("description".to_string(), JsonValue::from(worksite.description.clone()));
    properties.insert("reportedAt".to_string(), JsonValue::from(worksite.reported_at.to_rfc3339()));
    properties
        .insert("reportedByName".to_string(), JsonValue::from(worksite.reported_by_name.clone()));

    if let Some(agency_id) = &worksite.agency_id {
        properties.insert("agencyId".to_string(), JsonValue::from(agency_id.as_str()));
    }

    if let Some(agency_name) = &worksite.agency_name {
        properties.insert("agencyName".to_string(), JsonValue::from(agency_name.clone()));
    }

    if let Some(assignee) = &worksite.assigned_to_name {
        properties.insert("assignedToName".to_string(), JsonValue::from(assignee.clone()));
    }

    Feature {
        geometry: Some(geometry),
        properties: Some(properties),
        id: Some(Id::String(worksite.id.to_string())),
        bbox: None,
        foreign_members: None,
    }
}
