// Request builders for the assignment optimizer
//
// Pure functions: they only format the inputs, they never call the provider.

use std::collections::HashMap;

use super::prompts::{library, PromptTemplate};
use super::provider::CompletionRequest;
use super::schema::{assignment_plan_schema, work_order_schema, OutputSchema};
use super::types::{CandidateAgent, RatedAgent, WorkItem};
use crate::domain::worker::worker::MAX_PERFORMANCE;

/// A rendered prompt together with the schema its answer must follow
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRequest {
    pub template: PromptTemplate,
    pub prompt: String,
    pub schema: OutputSchema,
}

impl AssignmentRequest {
    pub fn to_completion_request(&self) -> CompletionRequest {
        CompletionRequest {
            system: self.template.system.clone(),
            prompt: self.prompt.clone(),
            schema_name: self.schema.name.to_string(),
            schema: self.schema.to_json_schema(),
        }
    }
}

fn format_skills(skills: &[String]) -> String {
    if skills.is_empty() {
        "none listed".to_string()
    } else {
        skills.join(", ")
    }
}

fn bullet_list<T>(entries: &[T], line: impl Fn(&T) -> String) -> String {
    if entries.is_empty() {
        return "- (none)".to_string();
    }
    entries.iter().map(line).collect::<Vec<_>>().join("\n")
}

/// Build the batch request for a set of complaints and candidate workers
///
/// Entries appear in the prompt in the order given.
pub fn build_assignment_request(
    work_items: &[WorkItem],
    agents: &[CandidateAgent],
) -> AssignmentRequest {
    let complaints = bullet_list(work_items, |item| {
        format!(
            "- Complaint ID: {}, Location: {}, Category: {}",
            item.id, item.location, item.category
        )
    });
    let workers = bullet_list(agents, |agent| {
        format!(
            "- Worker ID: {}, Name: {}, Area: {}, Skills: {}",
            agent.agent_id,
            agent.name,
            agent.area,
            format_skills(&agent.skills)
        )
    });

    let template = library::batch_assignment();
    let variables = HashMap::from([("complaints", complaints), ("workers", workers)]);
    let prompt = template.render(&variables);

    AssignmentRequest {
        template,
        prompt,
        schema: assignment_plan_schema(),
    }
}

/// Build the request for ranking workers against one free-text work order
///
/// Performance scores are clamped to the 0-100 scale before rendering.
pub fn build_work_order_request(description: &str, agents: &[RatedAgent]) -> AssignmentRequest {
    let workers = bullet_list(agents, |agent| {
        let performance = if agent.past_performance.is_finite() {
            agent.past_performance.clamp(0.0, MAX_PERFORMANCE)
        } else {
            0.0
        };
        format!(
            "- Worker ID: {}, Location: {}, Skills: {}, Past Performance: {}/100",
            agent.agent_id,
            agent.location,
            format_skills(&agent.skills),
            performance
        )
    });

    let template = library::work_order_assignment();
    let variables = HashMap::from([
        ("work_order", description.trim().to_string()),
        ("workers", workers),
    ]);
    let prompt = template.render(&variables);

    AssignmentRequest {
        template,
        prompt,
        schema: work_order_schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, location: &str, category: &str) -> WorkItem {
        WorkItem {
            id: id.to_string(),
            location: location.to_string(),
            category: category.to_string(),
        }
    }

    fn candidate(id: &str, name: &str, area: &str, skills: &[&str]) -> CandidateAgent {
        CandidateAgent {
            agent_id: id.to_string(),
            name: name.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            area: area.to_string(),
        }
    }

    #[test]
    fn batch_prompt_embeds_every_entry() {
        let request = build_assignment_request(
            &[item("C1", "Sector 17", "Hazardous")],
            &[candidate(
                "W1",
                "Asha",
                "Sector 17",
                &["Hazardous Waste Handling", "Composting"],
            )],
        );

        assert!(request
            .prompt
            .contains("- Complaint ID: C1, Location: Sector 17, Category: Hazardous"));
        assert!(request.prompt.contains(
            "- Worker ID: W1, Name: Asha, Area: Sector 17, Skills: Hazardous Waste Handling, Composting"
        ));
        assert!(request.prompt.contains("exactly one worker"));
        assert!(!request.prompt.contains("{{"));
        assert_eq!(request.schema.name, "assignment_plan");
    }

    #[test]
    fn batch_prompt_preserves_input_order() {
        let request = build_assignment_request(
            &[
                item("C3", "Ward 9", "Mixed"),
                item("C1", "Ward 2", "Organic"),
                item("C2", "Ward 5", "Recyclable"),
            ],
            &[
                candidate("W2", "Binod", "Ward 5", &[]),
                candidate("W1", "Asha", "Ward 2", &[]),
            ],
        );

        let pos = |needle: &str| request.prompt.find(needle).unwrap();
        assert!(pos("Complaint ID: C3") < pos("Complaint ID: C1"));
        assert!(pos("Complaint ID: C1") < pos("Complaint ID: C2"));
        assert!(pos("Worker ID: W2") < pos("Worker ID: W1"));
        assert!(request.prompt.contains("Skills: none listed"));
    }

    #[test]
    fn work_order_prompt_clamps_performance() {
        let agents = vec![
            RatedAgent {
                agent_id: "W1".to_string(),
                location: "Sector 17".to_string(),
                skills: vec!["Heavy Machinery".to_string()],
                past_performance: 140.0,
            },
            RatedAgent {
                agent_id: "W2".to_string(),
                location: "Sector 4".to_string(),
                skills: vec![],
                past_performance: 72.5,
            },
        ];

        let request = build_work_order_request("  Clear debris near Sector 17 market  ", &agents);

        assert!(request
            .prompt
            .contains("Work order: Clear debris near Sector 17 market\n"));
        assert!(request.prompt.contains(
            "- Worker ID: W1, Location: Sector 17, Skills: Heavy Machinery, Past Performance: 100/100"
        ));
        assert!(request.prompt.contains("Past Performance: 72.5/100"));
        assert_eq!(request.schema.name, "work_order_suggestions");
    }

    #[test]
    fn completion_request_carries_system_prompt_and_schema() {
        let request = build_assignment_request(&[item("C1", "A", "Mixed")], &[]);

        let completion = request.to_completion_request();

        assert_eq!(completion.system, library::batch_assignment().system);
        assert_eq!(completion.schema_name, "assignment_plan");
        assert_eq!(completion.schema["type"], "object");
        assert!(completion.prompt.contains("- (none)"));
    }
}
