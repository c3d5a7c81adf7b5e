// Prompt templates for LLM interactions
//
// This module contains all prompt templates used by the assignment optimizer.
// Prompts are versioned so a plan in the logs can be traced to the wording
// that produced it.

use std::collections::HashMap;

/// Prompt template structure
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    pub name: String,
    pub version: String,
    pub system: String,
    pub user_template: String,
}

impl PromptTemplate {
    /// Render the user template with variables
    ///
    /// `{{name}}` placeholders are replaced by the matching variable.
    /// Placeholders without a variable are left as written, and substituted
    /// text is never scanned again.
    pub fn render(&self, variables: &HashMap<&str, String>) -> String {
        let mut output = String::with_capacity(self.user_template.len());
        let mut rest = self.user_template.as_str();

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            let Some(end) = after_open.find("}}") else {
                output.push_str(&rest[start..]);
                return output;
            };

            let key = after_open[..end].trim();
            match variables.get(key) {
                Some(value) => output.push_str(value),
                None => output.push_str(&rest[start..start + end + 4]),
            }
            rest = &after_open[end + 2..];
        }

        output.push_str(rest);
        output
    }
}

pub mod library {
    use super::PromptTemplate;

    /// Batch plan: every pending complaint gets exactly one worker
    pub fn batch_assignment() -> PromptTemplate {
        PromptTemplate {
            name: "batch_assignment".to_string(),
            version: "1.0.0".to_string(),
            system: "You are an expert logistics manager for a city's waste management department. \
                     You assign waste collection workers to open complaints as efficiently as possible \
                     and reply only with JSON that matches the provided schema."
                .to_string(),
            user_template: "Assign the available workers to the pending complaints below.\n\n\
                            Aim for the least travel time and the best use of worker skills:\n\
                            - Compare each worker's area with the complaint location. Prefer workers \
                            assigned to the same zone or a neighbouring one.\n\
                            - Compare each worker's skills with the waste category. A worker skilled in \
                            \"Hazardous Waste Handling\" should be preferred for hazardous complaints.\n\
                            - Assign every complaint to exactly one worker. A worker may take several complaints.\n\
                            - Use only the complaint IDs and worker IDs listed here.\n\n\
                            Complaints:\n\
                            {{complaints}}\n\n\
                            Workers:\n\
                            {{workers}}\n\n\
                            Give a brief reason for each assignment and finish with a short summary \
                            of the overall strategy."
                .to_string(),
        }
    }

    /// Ranked candidates for one free-text work order
    pub fn work_order_assignment() -> PromptTemplate {
        PromptTemplate {
            name: "work_order_assignment".to_string(),
            version: "1.0.0".to_string(),
            system: "You are an assistant that recommends field workers for waste management \
                     work orders. Reply only with JSON that matches the provided schema."
                .to_string(),
            user_template: "Suggest the best workers for the work order below.\n\n\
                            Weigh these factors:\n\
                            - Proximity: workers closest to the work order location need the least travel.\n\
                            - Skill match: workers must have the skills the job requires.\n\
                            - Past performance: scores run from 0 to 100, higher is better.\n\n\
                            Work order: {{work_order}}\n\n\
                            Available workers:\n\
                            {{workers}}\n\n\
                            For each suggestion explain your reasoning and give a confidence score \
                            between 0.0 and 1.0. Use only the worker IDs listed here."
                .to_string(),
        }
    }
}
