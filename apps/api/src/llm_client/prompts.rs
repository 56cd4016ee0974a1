// Shared prompt constants.
// Each pipeline that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to repair prompts after a malformed reply.
pub const REEMIT_JSON_INSTRUCTION: &str = "\
    Re-emit the COMPLETE corrected JSON object only. \
    No prose, no code fences, no commentary before or after the object.";
