// src/ai/fallbacks.rs
//! The static content substituted when the completion service is missing or
//! misbehaving. Every adapter pulls from here; the shapes live in exactly
//! one place.

use std::collections::BTreeMap;

use super::AnalysisResult;
use crate::jobs::JobListing;

pub const RESUME_TIP_REPLY: &str = "\
Here are a few quick ways to improve your resume: start each bullet with a \
strong action verb, quantify your impact with numbers wherever you can, \
tailor your skills section to the job description, and keep the whole \
document to one or two pages. Upload your resume on the analysis page for a \
detailed score.";

pub const INTERVIEW_REPLY: &str = "\
For interviews, research the company beforehand, prepare two or three \
stories using the STAR method (Situation, Task, Action, Result), and have a \
couple of questions ready for the interviewer. Practice answering out loud \
at least once before the real thing.";

pub const JOB_SEARCH_REPLY: &str = "\
When searching for jobs, set up a consistent routine: refine your search \
keywords, apply to a handful of well-matched postings rather than dozens of \
generic ones, and tailor your resume for each application. The jobs page can \
aggregate openings for your target title and location.";

pub const SKILLS_REPLY: &str = "\
Focus on the skills the job description asks for, and back each one with \
evidence from your experience. Mix hard skills (tools, languages, \
frameworks) with one or two soft skills you can demonstrate with a concrete \
story.";

pub const GENERAL_CAREER_REPLY: &str = "\
I can help with resumes, job applications, interview preparation and career \
growth. Ask me something like \"How can I improve my resume?\" or \"How do I \
prepare for a technical interview?\"";

/// Rule-based reply chosen by keyword matching on the user's message
pub fn chat_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    if lower.contains("resume") || lower.contains("cv") {
        RESUME_TIP_REPLY
    } else if lower.contains("interview") {
        INTERVIEW_REPLY
    } else if lower.contains("job") || lower.contains("search") || lower.contains("opening") {
        JOB_SEARCH_REPLY
    } else if lower.contains("skill") {
        SKILLS_REPLY
    } else {
        GENERAL_CAREER_REPLY
    }
}

/// The fixed analysis object returned when the analyzer cannot produce a
/// real one. Scores are deliberately mid-range.
pub fn analysis() -> AnalysisResult {
    let mut section_feedback = BTreeMap::new();
    section_feedback.insert(
        "summary".to_string(),
        "Consider opening with a short, specific professional summary.".to_string(),
    );
    section_feedback.insert(
        "experience".to_string(),
        "Use action verbs and quantify achievements with concrete numbers.".to_string(),
    );
    section_feedback.insert(
        "education".to_string(),
        "List degrees in reverse chronological order with dates.".to_string(),
    );
    section_feedback.insert(
        "skills".to_string(),
        "Group related skills and mirror the wording of the job description.".to_string(),
    );

    AnalysisResult {
        overall_score: 75,
        ats_score: 68,
        content_score: 72,
        format_score: 78,
        strengths: vec![
            "Clear work history with recognizable role titles".to_string(),
            "Relevant technical skills are present".to_string(),
            "Reasonable length and structure".to_string(),
        ],
        weaknesses: vec![
            "Achievements are rarely quantified".to_string(),
            "Summary section is generic".to_string(),
            "Some sections use dense paragraphs instead of bullets".to_string(),
        ],
        section_feedback,
        keyword_suggestions: vec![
            "collaboration".to_string(),
            "project delivery".to_string(),
            "stakeholder communication".to_string(),
            "problem solving".to_string(),
        ],
    }
}

/// Three hard-coded job records shown when the AI job search fails
pub fn job_listings(title: &str, location: &str) -> Vec<JobListing> {
    let title = if title.trim().is_empty() {
        "Software Developer"
    } else {
        title.trim()
    };
    let location = if location.trim().is_empty() {
        "Remote"
    } else {
        location.trim()
    };

    vec![
        JobListing {
            id: "fallback-1".to_string(),
            title: title.to_string(),
            company: "TechCorp Solutions".to_string(),
            location: location.to_string(),
            salary: Some("80000 - 110000 USD".to_string()),
            link: String::new(),
            snippet: "Growing product team looking for hands-on engineers. \
                      Check the jobs page once the search service is back."
                .to_string(),
            posted_at: None,
        },
        JobListing {
            id: "fallback-2".to_string(),
            title: format!("Senior {}", title),
            company: "Innovatech Labs".to_string(),
            location: location.to_string(),
            salary: Some("110000 - 140000 USD".to_string()),
            link: String::new(),
            snippet: "Senior role with mentoring responsibilities and a \
                      modern stack."
                .to_string(),
            posted_at: None,
        },
        JobListing {
            id: "fallback-3".to_string(),
            title: format!("{} (Contract)", title),
            company: "BrightPath Consulting".to_string(),
            location: "Remote".to_string(),
            salary: None,
            link: String::new(),
            snippet: "Six-month contract with possible extension.".to_string(),
            posted_at: None,
        },
    ]
}

pub const DEFAULT_SKILL_SUGGESTIONS: &[&str] = &[
    "Communication",
    "Problem solving",
    "Teamwork",
    "Time management",
    "Adaptability",
    "Attention to detail",
];

pub fn skill_suggestions() -> Vec<String> {
    DEFAULT_SKILL_SUGGESTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_reply_routes_by_keyword() {
        assert_eq!(chat_reply("How can I improve my resume?"), RESUME_TIP_REPLY);
        assert_eq!(chat_reply("Tips for my next INTERVIEW please"), INTERVIEW_REPLY);
        assert_eq!(chat_reply("where do I search for a job"), JOB_SEARCH_REPLY);
        assert_eq!(chat_reply("which skills matter"), SKILLS_REPLY);
        assert_eq!(chat_reply("hello there"), GENERAL_CAREER_REPLY);
    }

    #[test]
    fn analysis_fallback_is_stable() {
        let a = analysis();
        assert_eq!(a.overall_score, 75);
        assert_eq!(a.ats_score, 68);
        assert_eq!(a, analysis());
        assert_eq!(a.section_feedback.len(), 4);
    }

    #[test]
    fn job_listings_fallback_has_three_records() {
        let jobs = job_listings("Data Engineer", "Berlin");
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].title, "Data Engineer");
        assert_eq!(jobs[0].location, "Berlin");

        let defaults = job_listings("", "");
        assert_eq!(defaults.len(), 3);
        assert_eq!(defaults[0].title, "Software Developer");
        assert_eq!(defaults[0].location, "Remote");
    }
}
