use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes prepared HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

#[async_trait]
impl<'a, T: HttpClient + ?Sized> HttpClient for &'a T {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        (**self).execute(req).await
    }
}
