// src/editor/state.rs
//! Mutation helpers for the editor's nested content object.
//!
//! Reordering swaps adjacent indices only; moving the first entry up or the
//! last entry down is a no-op.

use super::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeContent};

fn move_up<T>(items: &mut [T], index: usize) -> bool {
    if index == 0 || index >= items.len() {
        return false;
    }
    items.swap(index - 1, index);
    true
}

fn move_down<T>(items: &mut [T], index: usize) -> bool {
    if items.len() < 2 || index >= items.len() - 1 {
        return false;
    }
    items.swap(index, index + 1);
    true
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index >= items.len() {
        return None;
    }
    Some(items.remove(index))
}

impl ResumeContent {
    pub fn set_summary(&mut self, summary: &str) {
        self.personal_info.summary = summary.to_string();
    }

    // ===== Experience =====

    pub fn add_experience(&mut self, entry: ExperienceEntry) {
        self.experience.push(entry);
    }

    pub fn remove_experience(&mut self, index: usize) -> Option<ExperienceEntry> {
        remove_at(&mut self.experience, index)
    }

    pub fn move_experience_up(&mut self, index: usize) -> bool {
        move_up(&mut self.experience, index)
    }

    pub fn move_experience_down(&mut self, index: usize) -> bool {
        move_down(&mut self.experience, index)
    }

    // ===== Education =====

    pub fn add_education(&mut self, entry: EducationEntry) {
        self.education.push(entry);
    }

    pub fn remove_education(&mut self, index: usize) -> Option<EducationEntry> {
        remove_at(&mut self.education, index)
    }

    pub fn move_education_up(&mut self, index: usize) -> bool {
        move_up(&mut self.education, index)
    }

    pub fn move_education_down(&mut self, index: usize) -> bool {
        move_down(&mut self.education, index)
    }

    // ===== Projects =====

    pub fn add_project(&mut self, entry: ProjectEntry) {
        self.projects.push(entry);
    }

    pub fn remove_project(&mut self, index: usize) -> Option<ProjectEntry> {
        remove_at(&mut self.projects, index)
    }

    pub fn move_project_up(&mut self, index: usize) -> bool {
        move_up(&mut self.projects, index)
    }

    pub fn move_project_down(&mut self, index: usize) -> bool {
        move_down(&mut self.projects, index)
    }

    // ===== Skills =====

    /// Skills are a flat string list; duplicates are ignored case-insensitively
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            return false;
        }
        if self
            .skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case(trimmed))
        {
            return false;
        }
        self.skills.push(trimmed.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| !s.eq_ignore_ascii_case(skill));
        self.skills.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_with_experience(count: usize) -> ResumeContent {
        let mut content = ResumeContent::default();
        for i in 0..count {
            content.add_experience(ExperienceEntry::new(
                &format!("Role {}", i),
                &format!("Company {}", i),
            ));
        }
        content
    }

    #[test]
    fn move_up_swaps_exactly_two_adjacent_entries() {
        let mut content = content_with_experience(4);
        let ids: Vec<String> = content.experience.iter().map(|e| e.id.clone()).collect();

        assert!(content.move_experience_up(2));

        let after: Vec<String> = content.experience.iter().map(|e| e.id.clone()).collect();
        assert_eq!(after[0], ids[0]);
        assert_eq!(after[1], ids[2]);
        assert_eq!(after[2], ids[1]);
        assert_eq!(after[3], ids[3]);
    }

    #[test]
    fn move_down_swaps_exactly_two_adjacent_entries() {
        let mut content = content_with_experience(4);
        let ids: Vec<String> = content.experience.iter().map(|e| e.id.clone()).collect();

        assert!(content.move_experience_down(1));

        let after: Vec<String> = content.experience.iter().map(|e| e.id.clone()).collect();
        assert_eq!(after[0], ids[0]);
        assert_eq!(after[1], ids[2]);
        assert_eq!(after[2], ids[1]);
        assert_eq!(after[3], ids[3]);
    }

    #[test]
    fn boundary_moves_are_noops() {
        let mut content = content_with_experience(3);
        let ids: Vec<String> = content.experience.iter().map(|e| e.id.clone()).collect();

        assert!(!content.move_experience_up(0));
        assert!(!content.move_experience_down(2));
        assert!(!content.move_experience_up(7));
        assert!(!content.move_experience_down(7));

        let after: Vec<String> = content.experience.iter().map(|e| e.id.clone()).collect();
        assert_eq!(after, ids);
    }

    #[test]
    fn move_on_empty_list_is_noop() {
        let mut content = ResumeContent::default();
        assert!(!content.move_experience_up(0));
        assert!(!content.move_experience_down(0));
    }

    #[test]
    fn remove_experience_by_index() {
        let mut content = content_with_experience(3);
        let second_id = content.experience[1].id.clone();

        let removed = content.remove_experience(1).expect("entry");
        assert_eq!(removed.id, second_id);
        assert_eq!(content.experience.len(), 2);
        assert!(content.remove_experience(5).is_none());
    }

    #[test]
    fn education_reorder_mirrors_experience() {
        let mut content = ResumeContent::default();
        content.add_education(EducationEntry::new("School A", "BSc"));
        content.add_education(EducationEntry::new("School B", "MSc"));

        assert!(content.move_education_down(0));
        assert_eq!(content.education[0].school, "School B");
        assert_eq!(content.education[1].school, "School A");
    }

    #[test]
    fn skills_dedupe_case_insensitively() {
        let mut content = ResumeContent::default();
        assert!(content.add_skill("Rust"));
        assert!(!content.add_skill("rust"));
        assert!(!content.add_skill("  "));
        assert_eq!(content.skills, vec!["Rust"]);

        assert!(content.remove_skill("RUST"));
        assert!(content.skills.is_empty());
        assert!(!content.remove_skill("Rust"));
    }

    #[test]
    fn set_summary_replaces_text() {
        let mut content = ResumeContent::default();
        content.set_summary("Seasoned backend engineer.");
        assert_eq!(content.personal_info.summary, "Seasoned backend engineer.");
    }
}
