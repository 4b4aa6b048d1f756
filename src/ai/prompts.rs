// src/ai/prompts.rs
//! Prompt construction for the career assistant, the resume analyzer and
//! the AI job search. JSON-returning prompts spell out the exact shape the
//! parser expects.

pub const CHAT_SYSTEM: &str = "\
You are a career assistant for a resume-building application. You only \
answer questions about resumes, job applications, interviews, career growth \
and professional skills. Keep answers short, concrete and encouraging. \
Politely decline topics outside careers.";

pub fn chat_prompt(message: &str, context: &str) -> String {
    if context.trim().is_empty() {
        message.to_string()
    } else {
        format!("CONTEXT:\n{}\n\nQUESTION:\n{}", context, message)
    }
}

pub const ANALYSIS_SYSTEM: &str = "\
You are an expert resume reviewer and ATS specialist. You respond with a \
single JSON object and nothing else. Do NOT use markdown code fences. Do NOT \
add any explanation outside the JSON object.";

pub fn analysis_prompt(resume_text: &str) -> String {
    format!(
        "Analyze the following resume and score it.\n\
         \n\
         RESUME:\n{}\n\
         \n\
         Return JSON only, with exactly this shape:\n\
         {{\n\
           \"overallScore\": <0-100>,\n\
           \"atsScore\": <0-100>,\n\
           \"contentScore\": <0-100>,\n\
           \"formatScore\": <0-100>,\n\
           \"strengths\": [\"...\"],\n\
           \"weaknesses\": [\"...\"],\n\
           \"sectionFeedback\": {{\"summary\": \"...\", \"experience\": \"...\", \"education\": \"...\", \"skills\": \"...\"}},\n\
           \"keywordSuggestions\": [\"...\"]\n\
         }}",
        resume_text
    )
}

pub const JOB_SEARCH_SYSTEM: &str = "\
You are a job-market researcher. You respond with a single JSON array and \
nothing else. Do NOT use markdown code fences.";

pub fn job_search_prompt(title: &str, location: &str, limit: usize) -> String {
    format!(
        "Suggest {} realistic current job openings for the role \"{}\" in \
         \"{}\".\n\
         Return a JSON array only; each element has exactly these keys:\n\
         {{\"title\": \"...\", \"company\": \"...\", \"location\": \"...\", \
         \"salary\": \"...\", \"link\": \"...\", \"snippet\": \"...\"}}",
        limit, title, location
    )
}

pub const REWRITE_SYSTEM: &str = "\
You are a resume writing assistant. Return only the rewritten text, with no \
preamble, no quotes and no explanation.";

pub fn improve_summary_prompt(text: &str) -> String {
    format!(
        "Rewrite this professional summary to be concise and impactful, \
         2-3 sentences, active voice, no first-person pronouns:\n\n{}",
        text
    )
}

pub fn improve_experience_prompt(text: &str) -> String {
    format!(
        "Rewrite this work-experience description as strong resume bullet \
         text. Start with action verbs, quantify impact where the original \
         implies it, do not invent facts:\n\n{}",
        text
    )
}

pub fn suggest_skills_prompt(job_title: &str) -> String {
    format!(
        "List the 10 most relevant skills for a \"{}\" position. Return a \
         JSON array of strings only.",
        job_title
    )
}
