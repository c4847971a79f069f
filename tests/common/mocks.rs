use async_trait::async_trait;
use gemini_relay::{
    Error, Result,
    upstream::{GenerativeClient, UpstreamReply, UpstreamRequest},
};
use std::sync::{Arc, Mutex};

/// A recorded `generate_content` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub api_key: String,
    pub request: UpstreamRequest,
}

/// Mock upstream client for testing
#[derive(Debug, Clone)]
pub struct MockGenerativeClient {
    pub reply: Arc<Mutex<Option<UpstreamReply>>>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub error: Option<String>,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self {
            reply: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_reply(self, reply: UpstreamReply) -> Self {
        *self.reply.lock().unwrap() = Some(reply);
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &UpstreamRequest,
    ) -> Result<UpstreamReply> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            api_key: api_key.to_string(),
            request: request.clone(),
        });

        if let Some(ref error) = self.error {
            return Err(Error::transport(error.clone()));
        }

        self.reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::internal("No mock reply configured"))
    }
}

impl Default for MockGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}
