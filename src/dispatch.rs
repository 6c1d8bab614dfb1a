// Operation dispatcher: the post-login menu and its four handlers. Each
// handler issues at most one request and reports the outcome before the
// menu is shown again.

use crate::api::{Backend, ShortenRequest};
use crate::console::Console;
use crate::error::Result;
use crate::protocol::{
    decode_records, extract_short_code, has_http_scheme, render_record, Decoded, ResolveOutcome,
    ShortUrlError, ShortUrlRecord,
};
use crate::session::Session;
use crate::ui;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Shorten,
    RetrieveMine,
    Resolve,
    RetrieveAll,
    Exit,
}

impl Operation {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Operation::Shorten),
            "2" => Some(Operation::RetrieveMine),
            "3" => Some(Operation::Resolve),
            "4" => Some(Operation::RetrieveAll),
            "5" => Some(Operation::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Mine,
    All,
}

impl Listing {
    fn heading(self) -> &'static str {
        match self {
            Listing::Mine => "Your URLs:",
            Listing::All => "All URLs:",
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Listing::Mine => "URLs",
            Listing::All => "all URLs",
        }
    }
}

/// Everything a handler needs besides the backend and console.
pub struct Dispatcher<'a> {
    session: &'a Session,
    short_host: &'a str,
}

impl<'a> Dispatcher<'a> {
    pub fn new(session: &'a Session, short_host: &'a str) -> Self {
        Dispatcher {
            session,
            short_host,
        }
    }

    /// Loop over the operations menu until Exit. Transport failures are
    /// reported and abandon only the current operation.
    pub fn run<B: Backend, C: Console>(&self, api: &B, console: &mut C) -> Result<()> {
        loop {
            ui::operations_menu(console);
            let choice = console.prompt(ui::CHOICE_PROMPT)?;
            let Some(operation) = Operation::parse(&choice) else {
                console.warn("Invalid option. Please try again.");
                continue;
            };
            if operation == Operation::Exit {
                return Ok(());
            }

            match self.execute(operation, api, console) {
                Ok(()) => {}
                Err(e) if e.is_transport() => console.error(&e.to_string()),
                Err(e) => return Err(e),
            }
        }
    }

    pub fn execute<B: Backend, C: Console>(
        &self,
        operation: Operation,
        api: &B,
        console: &mut C,
    ) -> Result<()> {
        match operation {
            Operation::Shorten => self.shorten(api, console),
            Operation::RetrieveMine => self.retrieve_mine(api, console),
            Operation::Resolve => self.resolve(api, console),
            Operation::RetrieveAll => self.retrieve_all(api, console),
            Operation::Exit => Ok(()),
        }
    }

    pub fn shorten<B: Backend, C: Console>(&self, api: &B, console: &mut C) -> Result<()> {
        let long_url =
            console.prompt("Enter the URL to shorten (must start with http:// or https://)")?;
        if !has_http_scheme(&long_url) {
            debug!(url = %long_url, "rejected URL without http(s) scheme");
            console.warn("Invalid URL format. Please enter a valid HTTP or HTTPS URL.");
            return Ok(());
        }

        let req = ShortenRequest {
            long_url,
            user_id: self.session.user_id().to_string(),
        };
        console.say("Sending request to shorten URL...");
        if let Ok(json) = serde_json::to_string(&req) {
            console.say(&format!("Request Body: {json}"));
        }

        // The shorten response is opaque: echo it, never decode it.
        let res = console.in_flight("Shortening...", || api.shorten(&req))?;
        console.say(&format!("Response Code: {}", res.status));
        if res.status.is_success() {
            console.say(&format!("Shortened URL: {}", res.body));
        } else {
            console.error("Error shortening URL.");
            console.say(&format!("Response Body: {}", res.body));
        }
        Ok(())
    }

    pub fn retrieve_mine<B: Backend, C: Console>(&self, api: &B, console: &mut C) -> Result<()> {
        let user_id = self.session.user_id();
        let res = console.in_flight("Fetching your URLs...", || api.user_urls(user_id))?;
        self.list(console, Listing::Mine, decode_records(&res));
        Ok(())
    }

    pub fn resolve<B: Backend, C: Console>(&self, api: &B, console: &mut C) -> Result<()> {
        let short_url = console.prompt(&format!(
            "Enter the full shortened URL (e.g., {}/Ltvc8Kp)",
            self.short_host
        ))?;
        let short_code = match extract_short_code(&short_url) {
            Ok(code) => code,
            Err(ShortUrlError::MissingSlash) => {
                console.warn("Invalid format. Please enter the full shortened URL.");
                return Ok(());
            }
            Err(ShortUrlError::EmptyCode) => {
                console.warn("Invalid format. The shortened URL has no code after the last '/'.");
                return Ok(());
            }
        };

        console.say(&format!("Extracted short code: {short_code}"));
        let res = console.in_flight("Resolving...", || api.resolve(short_code))?;
        console.say(&format!("Response Code: {}", res.status));

        let outcome = ResolveOutcome::classify(&res);
        debug!(?outcome, "resolve outcome");
        match outcome {
            ResolveOutcome::Redirect(long_url) => {
                console.say(&format!("Redirects to: {long_url}"));
            }
            ResolveOutcome::RedirectWithoutLocation => {
                console.say("Short URL resolved, but no Location header found.");
            }
            ResolveOutcome::Body(long_url) => {
                console.say(&format!("Short URL resolved: {long_url}"));
            }
            ResolveOutcome::EmptyBody => {
                console.say("Short URL resolved, but response body is empty.");
            }
            ResolveOutcome::Failed(status) => {
                console.error(&format!("Error: {status}"));
            }
        }
        Ok(())
    }

    /// Lists every user's URLs; the endpoint is deliberately unscoped.
    pub fn retrieve_all<B: Backend, C: Console>(&self, api: &B, console: &mut C) -> Result<()> {
        let res = console.in_flight("Fetching all URLs...", || api.all_urls())?;
        self.list(console, Listing::All, decode_records(&res));
        Ok(())
    }

    fn list<C: Console>(
        &self,
        console: &mut C,
        listing: Listing,
        decoded: Decoded<Vec<ShortUrlRecord>>,
    ) {
        match decoded {
            Decoded::Ok(records) => {
                console.say(listing.heading());
                if records.is_empty() {
                    console.say("No URLs found.");
                }
                for record in &records {
                    console.say(&render_record(self.short_host, record));
                }
            }
            Decoded::Malformed(raw) => {
                debug!(body = %raw, ?listing, "malformed URL listing");
                console.error(&format!(
                    "Unexpected response format when retrieving {}. Response: {raw}",
                    listing.subject()
                ));
            }
            Decoded::Failed { status, .. } => {
                debug!(%status, ?listing, "URL listing failed");
                console.error(&format!("Error retrieving {}.", listing.subject()));
            }
        }
    }
}
