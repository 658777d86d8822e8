use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use tempfile::TempDir;

fn freightdocs_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("freightdocs"))
}

const USERS: &str = r#"[
  {"usuari":"u1","rol":"client","empresa":"Acme SL","fiscalid":"B11111111","adreca":"C/ Major 1, Lleida","telefon":"600111111"},
  {"usuari":"boss","rol":"Admin","empresa":"Transports","fiscalid":"B22222222","adreca":"C/ Port 2","telefon":"600222222"}
]"#;

const DOCUMENTS: &str = r#"[
  {"id":"1","num_factura":"F-100","data":"2024-03-01","usuari":"u1","fpagament":"Transfer","concepte":"Pallet transport","preu_unitari":"100","unitats":"2","iva":"21","dte":"0","albara":"A-1"},
  {"id":"2","num_factura":"F-100","data":"2024-03-02","usuari":"u1","fpagament":"Cash","concepte":"Packaging","preu_unitari":"50","unitats":"1","iva":"21","dte":"10","albara":"A-2"},
  {"id":"3","num_factura":"F-101","data":"2024-04-15","usuari":"u1","fpagament":"Card","concepte":"Storage","preu_unitari":"10","unitats":"3","iva":"10","dte":"","albara":""},
  {"id":"4","num_factura":"F-200","data":"2024-02-01","usuari":"ghost","fpagament":"Transfer","concepte":"Express","preu_unitari":"40","unitats":"1","iva":"21","dte":"0","albara":""},
  {"id":"5","num_factura":"","data":"2024-05-01","usuari":"u1","fpagament":"","concepte":"Draft","preu_unitari":"999","unitats":"1","iva":"21","dte":"0","albara":""}
]"#;

const SHIPMENT: &str = r#"[{"tracking_code":"TRK-1","origen":"Barcelona","desti":"Lisboa","eta":"2024-06-01","ubicacio_actual":"Madrid","estat":"En trànsit"}]"#;

/// How the stub API behaves
#[derive(Clone, Copy, PartialEq)]
enum Stub {
    Healthy,
    DocumentsDown,
    Down,
}

/// Minimal stand-in for the sheet API, answering on a local port.
fn spawn_sheet_api(stub: Stub) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&chunk[..n]),
                }
            }

            let request = String::from_utf8_lossy(&request);
            let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
            let (status, body) = route(&target, stub);

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{addr}/api/v1/sheet")
}

fn route(target: &str, stub: Stub) -> (&'static str, String) {
    if stub == Stub::Down {
        return ("503 Service Unavailable", r#"{"error":"down"}"#.to_string());
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let params: Vec<(&str, &str)> = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .collect();
    let param = |key: &str| params.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);

    match (path, param("sheet")) {
        ("/api/v1/sheet", Some("usuaris")) => ("200 OK", USERS.to_string()),
        ("/api/v1/sheet", Some("documents")) if stub == Stub::DocumentsDown => {
            ("500 Internal Server Error", r#"{"error":"boom"}"#.to_string())
        }
        ("/api/v1/sheet", Some("documents")) => ("200 OK", DOCUMENTS.to_string()),
        ("/api/v1/sheet/search", Some("usuaris")) => {
            let body = match (param("usuari"), param("contrasenya")) {
                (Some("u1"), Some("secret")) => {
                    r#"[{"usuari":"u1","nom":"Anna Puig","empresa":"Acme SL"}]"#
                }
                (Some("boss"), Some("admin")) => {
                    r#"[{"usuari":"boss","nom":"Joan Serra","empresa":"Transports"}]"#
                }
                _ => "[]",
            };
            ("200 OK", body.to_string())
        }
        ("/api/v1/sheet/search", None) => match param("tracking_code") {
            Some("TRK-1") => ("200 OK", SHIPMENT.to_string()),
            _ => ("200 OK", "[]".to_string()),
        },
        _ => ("404 Not Found", "{}".to_string()),
    }
}

/// Config dir pointing at a fresh stub API, language English
fn setup(stub: Stub) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("freightdocs-config");
    let url = spawn_sheet_api(stub);

    fs::create_dir_all(&config_path).unwrap();
    fs::write(
        config_path.join("config.toml"),
        format!(
            r#"[api]
url = "{url}"
timeout_secs = 5

[company]
name = "TRANSPORTSJADIANI"
address = "Carrer de la Logística, 123"
city = "08039 Barcelona"

[display]
language = "en"
currency_symbol = "€"

[pdf]
output_dir = "output"
"#
        ),
    )
    .unwrap();

    (temp_dir, config_path)
}

fn cfg(config_path: &Path) -> &str {
    config_path.to_str().unwrap()
}

fn login_as(config_path: &Path, user: &str, password: &str) {
    freightdocs_cmd()
        .args(["-C", cfg(config_path), "login", "--user", user, "--password", password])
        .assert()
        .success();
}

#[test]
fn test_help() {
    freightdocs_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("shipment tracking"));
}

#[test]
fn test_version() {
    freightdocs_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("freightdocs"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("freightdocs-config");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized freightdocs config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("output").is_dir());

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Language:         ca"))
        .stdout(predicate::str::contains("Logged in as:     -"));
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("freightdocs-config");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "init"])
        .assert()
        .success();

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_unsupported_language() {
    let (_temp, config_path) = setup(Stub::Healthy);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "--lang", "de", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language 'de'"));
}

#[test]
fn test_list_requires_login() {
    let (_temp, config_path) = setup(Stub::Healthy);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_login_wrong_password() {
    let (_temp, config_path) = setup(Stub::Healthy);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "login", "--user", "u1", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect user or password."));

    assert!(!config_path.join("session.toml").exists());
}

#[test]
fn test_login_empty_password() {
    let (_temp, config_path) = setup(Stub::Healthy);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "login", "--user", "u1", "--password", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in both user and password."));
}

#[test]
fn test_login_whoami_logout() {
    let (_temp, config_path) = setup(Stub::Healthy);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "login", "--user", "u1", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Anna Puig"))
        .stdout(predicate::str::contains("Acme SL"));

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[AP]"))
        .stdout(predicate::str::contains("Acme SL"));

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_client_lists_own_invoices_newest_first() {
    let (_temp, config_path) = setup(Stub::Healthy);
    login_as(&config_path, "u1", "secret");

    let output = freightdocs_cmd()
        .args(["-C", cfg(&config_path), "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("My invoices"));
    assert!(stdout.contains("296.45 €"));
    assert!(stdout.contains("33.00 €"));
    assert!(stdout.contains("Acme SL"));
    assert!(!stdout.contains("F-200"));
    assert!(!stdout.contains("Draft"));
    assert!(stdout.contains("Total: 2 invoices"));

    let newer = stdout.find("F-101").unwrap();
    let older = stdout.find("F-100").unwrap();
    assert!(newer < older);
}

#[test]
fn test_list_limit() {
    let (_temp, config_path) = setup(Stub::Healthy);
    login_as(&config_path, "u1", "secret");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "list", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("F-101"))
        .stdout(predicate::str::contains("F-100").not());
}

#[test]
fn test_staff_lists_everything_with_unknown_client() {
    let (_temp, config_path) = setup(Stub::Healthy);
    login_as(&config_path, "boss", "admin");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All invoices"))
        .stdout(predicate::str::contains("F-200"))
        .stdout(predicate::str::contains("Unknown client"))
        .stdout(predicate::str::contains("Total: 3 invoices"));

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "--lang", "ca", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Totes les factures"))
        .stdout(predicate::str::contains("Client desconegut"));
}

#[test]
fn test_show_invoice_by_number() {
    let (_temp, config_path) = setup(Stub::Healthy);
    login_as(&config_path, "u1", "secret");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "show", "F-100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INVOICE # F-100"))
        .stdout(predicate::str::contains("Date: 03/01/2024"))
        .stdout(predicate::str::contains("Tax ID: B11111111"))
        .stdout(predicate::str::contains("Pallet transport"))
        .stdout(predicate::str::contains("Packaging"))
        .stdout(predicate::str::contains("245.00 €"))
        .stdout(predicate::str::contains("VAT 21% (245.00 €)"))
        .stdout(predicate::str::contains("51.45 €"))
        .stdout(predicate::str::contains("296.45 €"))
        .stdout(predicate::str::contains("Payment method: Transfer"));
}

#[test]
fn test_show_invoice_by_index() {
    let (_temp, config_path) = setup(Stub::Healthy);
    login_as(&config_path, "u1", "secret");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INVOICE # F-101"))
        .stdout(predicate::str::contains("VAT 10% (30.00 €)"))
        .stdout(predicate::str::contains("33.00 €"));
}

#[test]
fn test_show_unknown_invoice() {
    let (_temp, config_path) = setup(Stub::Healthy);
    login_as(&config_path, "u1", "secret");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "show", "F-200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invoice 'F-200' not found"));

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "show", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid invoice index '9'"));
}

#[test]
fn test_fetch_failure_shows_single_error() {
    let (_temp, config_path) = setup(Stub::DocumentsDown);
    login_as(&config_path, "u1", "secret");

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "list"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("F-100").not())
        .stderr(predicate::str::contains(
            "Error: Could not load your documents. Please try again later.",
        ));
}

#[test]
fn test_track_shipment() {
    let (_temp, config_path) = setup(Stub::Healthy);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "track", "TRK-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Barcelona"))
        .stdout(predicate::str::contains("Lisboa"))
        .stdout(predicate::str::contains("Madrid"))
        .stdout(predicate::str::contains("In transit"))
        .stdout(predicate::str::contains("50%"));
}

#[test]
fn test_track_unknown_shipment() {
    let (_temp, config_path) = setup(Stub::Healthy);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "track", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No shipment found for tracking code: NOPE",
        ));
}

#[test]
fn test_login_api_down_shows_localized_error() {
    let (_temp, config_path) = setup(Stub::Down);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "--lang", "ca"])
        .args(["login", "--user", "u1", "--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: No s'ha pogut iniciar la sessió. Torna-ho a provar més tard.",
        ))
        .stderr(predicate::str::contains("Failed to fetch").not());

    assert!(!config_path.join("session.toml").exists());
}

#[test]
fn test_track_api_down_shows_localized_error() {
    let (_temp, config_path) = setup(Stub::Down);

    freightdocs_cmd()
        .args(["-C", cfg(&config_path), "--lang", "ca", "track", "TRK-1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Barcelona").not())
        .stderr(predicate::str::contains(
            "Error: No s'ha pogut consultar l'enviament. Torna-ho a provar més tard.",
        ))
        .stderr(predicate::str::contains("Failed to fetch").not());
}
