//! Home Assistant service calls.

use serde_json::{Map, Value};

use ha_gateway_core::{Domain, EntityId};

/// The Home Assistant services the gateway is allowed to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// `light.turn_on`
    TurnOn,
    /// `light.turn_off`
    TurnOff,
    /// `cover.set_cover_position`
    SetCoverPosition,
    /// `cover.set_cover_tilt_position`
    SetCoverTiltPosition,
}

impl Service {
    /// The light service for an on/off flag.
    #[must_use]
    pub const fn for_light(on: bool) -> Self {
        if on {
            Self::TurnOn
        } else {
            Self::TurnOff
        }
    }

    /// Domain the service belongs to.
    #[must_use]
    pub const fn domain(self) -> Domain {
        match self {
            Self::TurnOn | Self::TurnOff => Domain::Light,
            Self::SetCoverPosition | Self::SetCoverTiltPosition => Domain::Cover,
        }
    }

    /// Service name as it appears in the URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
            Self::SetCoverPosition => "set_cover_position",
            Self::SetCoverTiltPosition => "set_cover_tilt_position",
        }
    }
}

/// One invocation of a service against one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall {
    service: Service,
    entity_id: EntityId,
    fields: Map<String, Value>,
}

impl ServiceCall {
    /// Call `service` for `entity_id` with no extra fields.
    #[must_use]
    pub fn new(service: Service, entity_id: EntityId) -> Self {
        Self {
            service,
            entity_id,
            fields: Map::new(),
        }
    }

    /// Add a service data field, e.g. `position`.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The service being called.
    #[must_use]
    pub const fn service(&self) -> Service {
        self.service
    }

    /// The target entity.
    #[must_use]
    pub const fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Path relative to the base URL: `/api/services/<domain>/<service>`.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "/api/services/{}/{}",
            self.service.domain(),
            self.service.as_str()
        )
    }

    /// JSON body: `{"entity_id": ..., ...fields}`.
    #[must_use]
    pub fn body(&self) -> Value {
        let mut body = Map::with_capacity(self.fields.len() + 1);
        body.insert(
            "entity_id".to_string(),
            Value::String(self.entity_id.to_string()),
        );
        for (key, value) in &self.fields {
            body.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entity(id: &str) -> EntityId {
        EntityId::parse(id).unwrap()
    }

    #[test]
    fn light_service_paths() {
        let on = ServiceCall::new(Service::for_light(true), entity("light.a"));
        let off = ServiceCall::new(Service::for_light(false), entity("light.a"));
        assert_eq!(on.path(), "/api/services/light/turn_on");
        assert_eq!(off.path(), "/api/services/light/turn_off");
        assert_eq!(on.body(), json!({ "entity_id": "light.a" }));
    }

    #[test]
    fn cover_service_body() {
        let call = ServiceCall::new(Service::SetCoverTiltPosition, entity("cover.blinds"))
            .with_field("tilt_position", 40);
        assert_eq!(call.path(), "/api/services/cover/set_cover_tilt_position");
        assert_eq!(
            call.body(),
            json!({ "entity_id": "cover.blinds", "tilt_position": 40 })
        );
    }

    #[test]
    fn entity_id_field_cannot_be_replaced() {
        let call = ServiceCall::new(Service::SetCoverPosition, entity("cover.blinds"))
            .with_field("entity_id", "cover.other");
        assert_eq!(call.body()["entity_id"], "cover.blinds");
    }
}
