// All LLM prompt constants for the company generation pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::REEMIT_JSON_INSTRUCTION;

/// System prompt for company interview-data generation.
pub const COMPANY_GENERATION_SYSTEM: &str =
    "You are a meticulous researcher of software-engineering hiring processes, \
    specialising in frontend interview loops. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Company generation prompt template. Replace `{company_name}` before sending.
pub const COMPANY_GENERATION_PROMPT_TEMPLATE: &str = r#"Research the frontend engineering interview process at "{company_name}" and return it as ONE JSON object.

OUTPUT SCHEMA (return exactly this structure):
{
  "company": {
    "name": "string",
    "slug": "lowercase-kebab-case string",
    "country": "India" | "Global",
    "industry": "string",
    "foundedYear": number | null,
    "employeeCountBand": "1-50" | "51-200" | "201-1000" | "1001-5000" | "5001-10000" | "10000+" | null,
    "logoUrl": "https URL" | null,
    "logoDarkUrl": "https URL" | null,
    "website": "https URL" | null,
    "tags": ["string"],
    "salaryBands": { "<designation label>": { "min": number, "max": number, "currency": "ISO-4217 code, e.g. INR" } },
    "lastVerifiedAt": "ISO-8601 timestamp" | null
  },
  "designations": [
    {
      "title": "string, e.g. SDE3 – Frontend",
      "level": "SDE1" | "SDE2" | "SDE3" | "SDE4" | "SDE5" | "L3" | "L4" | "L5" | "L6" | "L7" | "IC3" | "IC4" | "IC5" | "IC6" | "IC7" | "MTS-1" | "MTS-2" | "MTS-3" | "SMTS" | "PMTS" | "Senior" | "Staff" | "Principal",
      "levelAliases": ["string"],
      "track": "Frontend" | "Fullstack" | "Mobile" | "Backend" | "Web Platform",
      "locationType": "Onsite" | "Hybrid" | "Remote" | null,
      "locations": ["string"],
      "mustHaveSkills": ["string"],
      "niceToHaveSkills": ["string"],
      "overview": "string" | null,
      "rounds": [
        {
          "order": number (1-based, contiguous),
          "type": "DSA" | "MachineCoding" | "SystemDesign" | "FrontendCore" | "Behavioral" | "BarRaiser" | "HiringManager" | "CodingPair" | "TakeHome",
          "title": "string" | null,
          "durationMins": number (15-240),
          "focusAreas": ["string"],
          "difficulty": number (0-1) | null,
          "frequency": number (0-1) | null,
          "confidence": number (0-1) | null,
          "rubric": {
            "criteria": [{ "name": "string", "weight": number (0-1), "description": "string" | null }],
            "passThreshold": number (0-1)
          },
          "materials": { "examplePrompts": ["string"], "links": ["https URL"] },
          "evidenceLinks": ["https URL"]
        }
      ]
    }
  ],
  "sources": [
    {
      "kind": "official" | "glassdoor" | "blind" | "leetcode" | "reddit" | "blog" | "video" | "other",
      "title": "string",
      "url": "https URL" | null,
      "notes": "string" | null,
      "capturedAt": "ISO-8601 timestamp" | null
    }
  ]
}

FORMATTING RULES:
1. All timestamps are ISO-8601 (e.g. 2024-05-01T00:00:00Z).
2. Keep every array to at most 8 items.
3. If something is unknown use null, [] or {}; NEVER invent values, URLs or numbers.
4. Return ONLY the JSON object: no prose before or after it, no code fences.

DOMAIN GUIDANCE:
1. If the company hires differently in India and globally, reflect the variant that matches "country" and mention the other in "overview".
2. Cite at least 3 sources.
3. When reports conflict, describe the most commonly reported pattern and lower "confidence" accordingly.
4. Include at least one designation, with its rounds in interview order."#;

/// Builds the generation prompt for one company. Pure and deterministic.
pub fn build_company_prompt(company_name: &str) -> String {
    COMPANY_GENERATION_PROMPT_TEMPLATE.replace("{company_name}", company_name.trim())
}

/// Builds the follow-up prompt sent after a reply failed to parse or validate.
pub fn build_repair_prompt(original_prompt: &str, error: &str) -> String {
    format!(
        "{original_prompt}\n\nYOUR PREVIOUS REPLY WAS REJECTED.\nERROR: {error}\n\n{REEMIT_JSON_INSTRUCTION}"
    )
}
