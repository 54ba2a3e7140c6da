//! リモート分類器に送る依頼文
//!
//! カタログ全体の説明・ユーザーの指示・出力フォーマットの 3 つを 1 つのテキストにまとめる。

use super::catalog::PersonaCatalog;
use super::enhanced_prompt::TASK_MARKER;

/// 依頼文を組み立てる
pub fn build_request(catalog: &PersonaCatalog, instruction: &str) -> String {
    let personas: Vec<String> = catalog
        .iter()
        .map(|p| format!("- {} ({}): For {}", p.title, p.command, p.summary))
        .collect();

    format!(
        "You are an expert at selecting the best persona for a prompt sent to a coding assistant.\n\
         \n\
         Available personas:\n\
         {personas}\n\
         \n\
         User prompt: \"{instruction}\"\n\
         \n\
         Analyze the user's intent and select the MOST appropriate persona. \
         Respond with ONLY the enhanced prompt in this EXACT format:\n\
         \n\
         /[command] You are a [Persona Name] with expertise in [domain]. \
         [Brief context about how to approach this specific task].\n\
         \n\
         {marker} {instruction}\n\
         \n\
         Start the response with the command token and repeat the user prompt verbatim after {marker}. \
         Consider nuance, implied requirements, and the best methodological approach.",
        personas = personas.join("\n"),
        instruction = instruction,
        marker = TASK_MARKER,
    )
}
