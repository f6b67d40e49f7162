use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceType};
use crate::task::{Task, span_days};

const WORK_HOURS_PER_DAY: f64 = 8.0;

/// Aggregated project cost, per component, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub labor_cost: i64,
    pub material_cost: i64,
    pub fixed_cost: i64,
    pub total_cost: i64,
}

/// Sums labor, material, and fixed cost across all assignments.
///
/// Labor bills `Work` resources by task span (whole days, minimum one) at
/// eight hours a day, scaled by assignment units. Materials bill per
/// assigned task at `standard_rate * units + cost_per_use`; a material
/// nobody assigned still charges its per-use amount once. `Cost` resources
/// are flat. Summary rows never bill. Unknown resource ids on a task simply
/// contribute nothing here; [`diagnose_project_cost`] explains them.
pub fn calculate_project_cost(tasks: &[Task], resources: &[Resource]) -> CostBreakdown {
    let mut labor = 0.0;
    let mut material = 0.0;
    let mut fixed = 0.0;

    for resource in resources {
        match resource.resource_type {
            ResourceType::Work => {
                if resource.standard_rate <= 0.0 {
                    continue;
                }
                for task in assigned_tasks(tasks, &resource.id) {
                    let units = task.assignment_units(&resource.id).unwrap_or(0.0);
                    let hours =
                        span_days(task.start_date, task.end_date) as f64 * WORK_HOURS_PER_DAY;
                    labor += hours * resource.standard_rate * units;
                }
            }
            ResourceType::Material => {
                let mut assigned = false;
                for task in assigned_tasks(tasks, &resource.id) {
                    assigned = true;
                    let units = task.assignment_units(&resource.id).unwrap_or(0.0);
                    material += resource.standard_rate * units + resource.cost_per_use;
                }
                // An unassigned material with a per-use charge is still a
                // one-off project cost.
                if !assigned && resource.cost_per_use > 0.0 {
                    material += resource.cost_per_use;
                }
            }
            ResourceType::Cost => {
                fixed += resource.standard_rate + resource.cost_per_use;
            }
        }
    }

    let labor_cost = labor.round() as i64;
    let material_cost = material.round() as i64;
    let fixed_cost = fixed.round() as i64;
    CostBreakdown {
        labor_cost,
        material_cost,
        fixed_cost,
        total_cost: labor_cost + material_cost + fixed_cost,
    }
}

/// Non-summary tasks carrying an assignment for `resource_id`.
fn assigned_tasks<'a>(tasks: &'a [Task], resource_id: &'a str) -> impl Iterator<Item = &'a Task> {
    tasks
        .iter()
        .filter(move |task| !task.is_summary && task.assignment_units(resource_id).is_some())
}

/// Category of a cost diagnostic finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostIssueKind {
    /// A `Work` resource without a positive standard rate.
    NoRate,
    /// A `Material` or `Cost` resource with neither rate nor per-use charge.
    NoCost,
    /// A billable resource assigned to no task.
    NoAssignments,
    /// A task assignment naming a resource id absent from the resource list.
    OrphanAssignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostIssue {
    pub kind: CostIssueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i32>,
    pub message: String,
}

/// Findings that explain zero or surprising totals. Purely informational:
/// producing the report never fails and never changes the numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostDiagnostics {
    pub issues: Vec<CostIssue>,
}

impl CostDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues_of(&self, kind: CostIssueKind) -> impl Iterator<Item = &CostIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// One-line report for log or status-bar output.
    pub fn to_summary(&self) -> String {
        if self.issues.is_empty() {
            return "no cost issues".to_string();
        }
        let mut parts = Vec::new();
        for (kind, label) in [
            (CostIssueKind::NoRate, "NO_RATE"),
            (CostIssueKind::NoCost, "NO_COST"),
            (CostIssueKind::NoAssignments, "NO_ASSIGNMENTS"),
            (CostIssueKind::OrphanAssignment, "ORPHAN_ASSIGNMENT"),
        ] {
            let count = self.issues_of(kind).count();
            if count > 0 {
                parts.push(format!("{label}={count}"));
            }
        }
        parts.join(", ")
    }
}

/// Walks resources and assignments for anything that would surprise a user
/// reading the cost breakdown.
pub fn diagnose_project_cost(tasks: &[Task], resources: &[Resource]) -> CostDiagnostics {
    let mut issues = Vec::new();

    for resource in resources {
        let assigned_count = assigned_tasks(tasks, &resource.id).count();
        match resource.resource_type {
            ResourceType::Work => {
                if resource.standard_rate <= 0.0 {
                    issues.push(CostIssue {
                        kind: CostIssueKind::NoRate,
                        resource_id: Some(resource.id.clone()),
                        task_id: None,
                        message: format!("work resource '{}' has no standard rate", resource.id),
                    });
                }
                if assigned_count == 0 {
                    issues.push(no_assignments_issue(resource));
                }
            }
            ResourceType::Material => {
                if resource.standard_rate <= 0.0 && resource.cost_per_use <= 0.0 {
                    issues.push(no_cost_issue(resource));
                }
                if assigned_count == 0 {
                    issues.push(no_assignments_issue(resource));
                }
            }
            ResourceType::Cost => {
                if resource.standard_rate <= 0.0 && resource.cost_per_use <= 0.0 {
                    issues.push(no_cost_issue(resource));
                }
            }
        }
    }

    for task in tasks {
        for assignment in task.effective_assignments() {
            if !resources
                .iter()
                .any(|resource| resource.id == assignment.resource_id)
            {
                issues.push(CostIssue {
                    kind: CostIssueKind::OrphanAssignment,
                    resource_id: Some(assignment.resource_id.clone()),
                    task_id: Some(task.id),
                    message: format!(
                        "task {} references unknown resource '{}'",
                        task.id, assignment.resource_id
                    ),
                });
            }
        }
    }

    CostDiagnostics { issues }
}

fn no_assignments_issue(resource: &Resource) -> CostIssue {
    CostIssue {
        kind: CostIssueKind::NoAssignments,
        resource_id: Some(resource.id.clone()),
        task_id: None,
        message: format!("resource '{}' is assigned to no task", resource.id),
    }
}

fn no_cost_issue(resource: &Resource) -> CostIssue {
    CostIssue {
        kind: CostIssueKind::NoCost,
        resource_id: Some(resource.id.clone()),
        task_id: None,
        message: format!(
            "resource '{}' has neither a rate nor a per-use cost",
            resource.id
        ),
    }
}
