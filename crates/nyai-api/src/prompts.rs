//! Prompt templates for every model call site.

/// Conversational reply, with the prior history rendered by the context
/// strategy.
pub fn chat(context: &str, user_message: &str) -> String {
    format!(
        "You are an expert Indian Legal AI Assistant named NyAI. Your knowledge is up-to-date as of your last training.\n\
         Answer the user's question based on your general understanding of Indian law.\n\
         Provide clear, concise, and accurate answers. Always include a disclaimer that you are an AI and not a legal professional.\n\n\
         Previous Conversation History for context:\n\
         {context}\n\n\
         Current User's Question: {user_message}\n\n\
         AI Answer:"
    )
}

pub fn conversation_title(first_user_prompt: &str) -> String {
    format!(
        "Generate one single, very short, concise title (4 words maximum) for a legal conversation \
         that starts with: \"{first_user_prompt}\". Do not provide options. Respond with the title only."
    )
}

/// Upload-time analysis. `excerpt` is the first 3000 characters of the
/// extracted text.
pub fn document_analysis(excerpt: &str) -> String {
    format!(
        "You are a legal document analyst. Analyze the following document and provide a JSON response with these keys:\n\
         - \"document_type\": Type of document (contract, legal brief, agreement, etc.)\n\
         - \"summary\": Brief summary of the document (max 200 words)\n\
         - \"key_topics\": Array of main topics/subjects covered\n\
         - \"entities\": Array of important entities mentioned (people, companies, dates)\n\
         - \"language_complexity\": \"simple\", \"moderate\", or \"complex\"\n\n\
         Document content:\n\
         ---\n\
         {excerpt}\n\
         ---"
    )
}

pub fn document_question(filename: &str, question: &str, text: &str) -> String {
    format!(
        "You are an expert legal document analyst. Answer the user's question based on the provided document content.\n\
         Provide a JSON response with these keys:\n\
         - \"answer\": Your detailed answer to the question\n\
         - \"confidence\": \"high\", \"medium\", or \"low\" based on how certain you are\n\
         - \"relevant_sections\": Array of relevant text snippets from the document (max 3)\n\
         - \"follow_up_questions\": Array of 2-3 suggested follow-up questions\n\n\
         If the question cannot be answered from the document content, explain what information is missing.\n\n\
         Document: {filename}\n\
         Question: {question}\n\n\
         Document Content:\n\
         ---\n\
         {text}\n\
         ---"
    )
}

pub fn analysis_summary(text: &str) -> String {
    format!(
        "Provide a comprehensive summary of this document in JSON format:\n\
         - \"executive_summary\": Main points in 2-3 sentences\n\
         - \"detailed_summary\": Comprehensive summary (300-500 words)\n\
         - \"key_sections\": Array of important sections with titles and brief descriptions\n\n\
         Document: {text}"
    )
}

pub fn analysis_key_points(text: &str) -> String {
    format!(
        "Extract and organize key points from this document in JSON format:\n\
         - \"main_points\": Array of the most important points (max 10)\n\
         - \"supporting_details\": Object with main points as keys and supporting details as values\n\
         - \"action_items\": Array of any action items or next steps mentioned\n\n\
         Document: {text}"
    )
}

pub fn analysis_legal_issues(text: &str) -> String {
    format!(
        "Identify legal issues and concerns in this document in JSON format:\n\
         - \"legal_issues\": Array of potential legal issues or concerns\n\
         - \"risk_assessment\": Overall risk level (\"low\", \"medium\", \"high\") with explanation\n\
         - \"recommendations\": Array of recommended actions or considerations\n\
         - \"clauses_of_concern\": Array of specific clauses that need attention\n\n\
         Document: {text}"
    )
}

pub fn simplify(context: &str, text: &str) -> String {
    let context = if context.is_empty() {
        "No context found."
    } else {
        context
    };
    format!(
        "You are an expert at simplifying complex Indian legal clauses for a general audience.\n\
         Your task is to take the following legal clause from India and return a JSON object with two keys: \
         \"simplified_explanation\" and \"real_life_example\".\n\n\
         To help you, here is some context I found on the web which might be related:\n\
         --- WEB CONTEXT ---\n\
         {context}\n\
         --- END OF CONTEXT ---\n\n\
         Now, based on the original text (and the context if it was helpful), provide your analysis.\n\
         1.  For \"simplified_explanation\": The statement should be simplified.\n\
         2.  For \"real_life_example\": A simple and easy to understand example should be given.\n\n\
         Original Indian Legal Clause to simplify:\n\
         ---\n\
         {text}\n\
         ---"
    )
}

pub fn translate(json: &str, target_language: &str) -> String {
    format!(
        "You are an expert translator. Your task is to translate all the string values in the following \
         JSON object into {target_language}.\n\
         - Do NOT translate the JSON keys.\n\
         - Keep the exact same JSON structure.\n\n\
         JSON to translate:\n\
         {json}"
    )
}
