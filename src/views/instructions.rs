//! Setup instructions shown while the API is unreachable

use crate::services::ApiStatus;

pub fn render(status: ApiStatus, base_url: &str, checking: bool) -> String {
    let badge = if checking {
        "Checking...".to_string()
    } else {
        status.label().to_string()
    };

    let mut out = String::new();
    out.push_str(&format!("API status: {}\n\n", badge));
    out.push_str("Biblioteca\n");
    out.push_str("API not connected! Start the books backend first, then type `retry`.\n\n");

    out.push_str("How to run the backend\n");
    out.push_str("  1. Install the dependencies:\n");
    out.push_str("       pip install -r requirements.txt\n");
    out.push_str("  2. Create a .env file in the backend root with the database credentials:\n");
    out.push_str("       SUPABASE_URL=<your url>\n");
    out.push_str("       SUPABASE_SERVICE_KEY=<your service key>\n");
    out.push_str("  3. Start the server:\n");
    out.push_str("       uvicorn app.main:app --reload\n\n");

    out.push_str(&format!("API endpoints ({})\n", base_url));
    for (method, path) in [
        ("GET", "/health"),
        ("GET", "/books?limit=50&offset=0&sort=-created_at"),
        ("GET", "/books/{id}"),
        ("POST", "/books"),
        ("PATCH", "/books/{id}"),
        ("DELETE", "/books/{id}"),
    ] {
        out.push_str(&format!("  {:<7}{}\n", method, path));
    }
    out.push_str(&format!("  Interactive docs: {}/docs\n\n", base_url.trim_end_matches('/')));

    out.push_str("Example payload for POST /books\n");
    out.push_str(concat!(
        "  {\n",
        "    \"title\": \"Book title\",\n",
        "    \"authors\": [\"Author 1\", \"Author 2\"],\n",
        "    \"pages\": 256,\n",
        "    \"publish_year\": 2024\n",
        "  }\n",
    ));
    out.push_str("\nPoint the console elsewhere with --api-url or BIBLIOTECA_API_URL.\n");
    out
}
