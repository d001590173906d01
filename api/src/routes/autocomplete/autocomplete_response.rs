use qna_store::QnaPair;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<QnaPair>,
}
