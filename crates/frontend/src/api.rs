use callout_shared::models::{AppendRequest, AppendResponse, ErrorResponse};

const UPDATE_MAP_PATH: &str = "/api/updateMap";

fn api_url(path: &str) -> Result<String, String> {
    let origin = web_sys::window()
        .ok_or("No window")?
        .location()
        .origin()
        .map_err(|_| "Failed to read page origin".to_string())?;
    Ok(format!("{}{}", origin, path))
}

/// Turn a non-success response body into the message shown to the operator.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(resp) => resp.error,
        Err(_) if body.trim().is_empty() => format!("Request failed with status {}", status),
        Err(_) => format!("Request failed with status {}: {}", status, body.trim()),
    }
}

/// Store one callout on the server. Nothing in the session changes here.
pub async fn append_callout(req: &AppendRequest) -> Result<(), String> {
    let resp = reqwest::Client::new()
        .post(api_url(UPDATE_MAP_PATH)?)
        .json(req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| e.to_string())?;
    if !status.is_success() {
        return Err(error_message(status.as_u16(), &body));
    }

    let parsed: AppendResponse = serde_json::from_str(&body).map_err(|e| e.to_string())?;
    if parsed.success {
        Ok(())
    } else {
        Err("Server did not confirm the update".to_string())
    }
}
