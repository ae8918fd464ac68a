// ABOUTME: Build script for embedding the default API origin at compile time
// ABOUTME: Captures ACADEMY_BUILD_API_BASE_URL so release builds can ship pointed at production

fn main() {
    // Runtime ACADEMY_API_BASE_URL still overrides whatever is embedded here
    if let Ok(url) = std::env::var("ACADEMY_BUILD_API_BASE_URL") {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) || url.contains(char::is_whitespace) {
            panic!("ACADEMY_BUILD_API_BASE_URL must be an http(s) URL, got {:?}", url);
        }
        println!("cargo:rustc-env=ACADEMY_BUILD_API_BASE_URL={}", url);
    }

    println!("cargo:rerun-if-env-changed=ACADEMY_BUILD_API_BASE_URL");
}
