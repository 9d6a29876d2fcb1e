//! Prompt assembly for the explanation generator. The model is constrained
//! to rephrase the validated advice supplied in the prompt; it must not
//! produce medical content of its own.

use super::ExplanationRequest;
use crate::models::enums::Gender;

pub fn system_prompt(lang: &str) -> String {
    format!(
        "You are an experienced, caring and pedagogical pharmacist. A patient \
is asking whether they can take a medication without a prescription.\n\
\n\
STRICT RULES:\n\
- Base your reply EXCLUSIVELY on the validated advice elements provided below.\n\
- Do not invent ANY medical information that is not in those elements.\n\
- Address the patient directly and politely.\n\
- Refer to their specific answers (\"You told us that...\").\n\
- Explain the risks concretely, in plain language.\n\
- End with one clear action (see a pharmacist, see a doctor, ...).\n\
- Never say \"according to the database\" or \"the system detected\".\n\
- Be reassuring but firm about contraindications.\n\
- Maximum 5 short sentences.\n\
- Reply in {}.",
        language_name(lang)
    )
}

pub fn user_prompt(request: &ExplanationRequest) -> String {
    let mut prompt = String::new();

    prompt.push_str("PATIENT CONTEXT:\n");
    prompt.push_str(&patient_line(request));
    if !request.triggers.is_empty() {
        prompt.push_str("\nAnswers that raised an alert:\n");
        for trigger in &request.triggers {
            prompt.push_str(&format!(
                "- {} -> yes ({})\n",
                trigger.question_code,
                trigger.risk_level.as_str()
            ));
        }
    }

    prompt.push_str(&format!(
        "\nREQUESTED MEDICATION: {} (active substances: {})\n",
        request.drug_name,
        if request.substances.is_empty() {
            "unknown".to_string()
        } else {
            request.substances.join(", ")
        }
    ));
    prompt.push_str(&format!("DETECTED RISK LEVEL: {}\n", request.score.as_str()));

    if request.details.is_empty() {
        prompt.push_str(
            "\nExplain why self-medication is not recommended in this situation, \
factually and kindly.\n",
        );
    } else {
        prompt.push_str("\nVALIDATED ADVICE ELEMENTS TO USE:\n");
        for detail in &request.details {
            prompt.push_str(&format!("- {detail}\n"));
        }
        prompt.push_str(
            "\nRephrase these elements into one personalized explanation for this \
patient, taking their profile and answers into account.\n",
        );
    }

    prompt
}

fn patient_line(request: &ExplanationRequest) -> String {
    let who = match request.gender {
        Some(Gender::Female) => "a woman",
        Some(Gender::Male) => "a man",
        None => "a patient",
    };
    let age = match request.age {
        Some(age) => format!("{age} years old"),
        None => "of unspecified age".to_string(),
    };
    let meds = if request.has_other_meds {
        ", taking other medications daily"
    } else {
        ""
    };
    format!("The patient is {who}, {age}{meds}.\n")
}

fn language_name(lang: &str) -> &str {
    match lang {
        "fr" => "French",
        "en" => "English",
        "es" => "Spanish",
        _ => "the patient's own language",
    }
}
