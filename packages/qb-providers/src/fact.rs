use serde_json::Value;

use crate::Result;
use qb_config::Remote;

pub async fn random_fact(cfg: &Remote) -> Result<Option<String>> {
	let client = crate::client(cfg.fact_timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.fact_path);
	let res = client.get(url).headers(crate::default_headers(&cfg.default_headers)?).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	Ok(parse_fact_response(&json))
}

fn parse_fact_response(json: &Value) -> Option<String> {
	json.get("weird_fact")
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|fact| !fact.is_empty())
		.map(ToString::to_string)
}
