use serde::{Deserialize, Serialize};

/// Classification of a resource, driving how it contributes to project cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    /// People and equipment billed by working time at `standard_rate` per hour.
    Work,
    /// Consumables billed per assigned unit plus a per-use charge.
    Material,
    /// Flat cost buckets with no time or unit scaling.
    Cost,
}

/// Available capacity of a resource, tagged by the format it arrived in.
///
/// Historical project files carry `max_units` either as a fraction
/// (1.0 = full time) or as a percentage integer (100 = full time). The
/// format is resolved once at ingestion via [`ResourceCapacity::from_raw`];
/// consumers only ever read [`ResourceCapacity::as_fraction`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ResourceCapacity {
    Fraction(f64),
    Percentage(f64),
}

impl ResourceCapacity {
    /// Tags a raw `max_units` value from an untagged source. Values above 10
    /// are taken to be percentages; anything else is an already-normalized
    /// fraction. Ambiguous for fractional capacities above 10x, so tagged
    /// data should prefer the explicit variants.
    pub fn from_raw(raw: f64) -> Self {
        if raw > 10.0 {
            ResourceCapacity::Percentage(raw)
        } else {
            ResourceCapacity::Fraction(raw)
        }
    }

    pub fn as_fraction(&self) -> f64 {
        match self {
            ResourceCapacity::Fraction(value) => *value,
            ResourceCapacity::Percentage(value) => value / 100.0,
        }
    }
}

impl Default for ResourceCapacity {
    fn default() -> Self {
        ResourceCapacity::Fraction(1.0)
    }
}

/// Represents an allocation of a resource to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    /// Identifier of the assigned resource.
    pub resource_id: String,
    /// Fraction of the resource's full-time capacity consumed (1.0 = 100%).
    /// May exceed 1.0 for overtime or sit below it for part-time work.
    pub units: f64,
}

impl ResourceAssignment {
    pub fn new(resource_id: impl Into<String>, units: f64) -> Self {
        Self {
            resource_id: resource_id.into(),
            units,
        }
    }
}

/// A person, material, or cost bucket that tasks draw on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub resource_type: ResourceType,
    /// Hourly rate for `Work`, per-unit rate for `Material`, flat amount for
    /// `Cost`.
    #[serde(default)]
    pub standard_rate: f64,
    #[serde(default)]
    pub overtime_rate: f64,
    /// Flat charge applied per use (per assignment for materials).
    #[serde(default)]
    pub cost_per_use: f64,
    #[serde(default)]
    pub capacity: ResourceCapacity,
    /// Calendar governing this resource's working days, when one is assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            resource_type,
            standard_rate: 0.0,
            overtime_rate: 0.0,
            cost_per_use: 0.0,
            capacity: ResourceCapacity::default(),
            calendar_id: None,
        }
    }

    pub fn with_rate(mut self, standard_rate: f64) -> Self {
        self.standard_rate = standard_rate;
        self
    }

    pub fn with_overtime_rate(mut self, overtime_rate: f64) -> Self {
        self.overtime_rate = overtime_rate;
        self
    }

    pub fn with_cost_per_use(mut self, cost_per_use: f64) -> Self {
        self.cost_per_use = cost_per_use;
        self
    }

    pub fn with_capacity(mut self, capacity: ResourceCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_calendar(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }
}
