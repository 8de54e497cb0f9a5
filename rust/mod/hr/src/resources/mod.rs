//! One definition per HR workflow.

pub mod access_management;
pub mod compensation_planning;
pub mod culture_experience;
pub mod employee_engagement;
pub mod employee_helpdesk;
pub mod employee_onboarding;
pub mod employee_rewards;
pub mod employee_staffing;
pub mod goal_settings;
pub mod jobs_card;
pub mod leaves_attendance;
pub mod payroll;
pub mod pre_hire_management;
pub mod recruitment_ats;
pub mod talent_development;
pub mod talent_mapping;

use hrms_store::ResourceDef;

/// Every workflow resource, in URL order.
pub fn all() -> Vec<ResourceDef> {
    vec![
        access_management::resource(),
        compensation_planning::resource(),
        culture_experience::resource(),
        employee_engagement::resource(),
        employee_helpdesk::resource(),
        employee_onboarding::resource(),
        employee_rewards::resource(),
        employee_staffing::resource(),
        goal_settings::resource(),
        jobs_card::resource(),
        leaves_attendance::resource(),
        payroll::resource(),
        pre_hire_management::resource(),
        recruitment_ats::resource(),
        talent_development::resource(),
        talent_mapping::resource(),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn definitions_are_consistent() {
        for def in all() {
            def.check().unwrap_or_else(|e| panic!("{}: {}", def.name, e));
        }
    }

    #[test]
    fn names_and_tables_are_unique() {
        let defs = all();
        assert_eq!(defs.len(), 16);
        let names: HashSet<_> = defs.iter().map(|d| d.name).collect();
        let tables: HashSet<_> = defs.iter().map(|d| d.table).collect();
        assert_eq!(names.len(), defs.len());
        assert_eq!(tables.len(), defs.len());
        assert!(!names.contains("audit-logs"));
    }

    #[test]
    fn urls_use_kebab_case_of_table() {
        for def in all() {
            assert_eq!(def.name.replace('-', "_"), def.table);
        }
    }
}
