// UI layer: banner and numbered menus, plus `run`, which walks the operator
// through login and then the operations loop exactly once.

use crate::api::Backend;
use crate::console::Console;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::session::bootstrap;

pub const BANNER: &str = "Welcome to the URL Shortener Client!";
pub const CHOICE_PROMPT: &str = "Choose an option";

pub fn start_menu<C: Console>(console: &mut C) {
    console.say("");
    console.say("1. Log In");
    console.say("2. Create New User");
    console.say("3. Exit");
}

pub fn operations_menu<C: Console>(console: &mut C) {
    console.say("");
    console.say("Options:");
    console.say("1. Shorten a URL");
    console.say("2. Retrieve your URLs");
    console.say("3. Resolve a short URL");
    console.say("4. View all URLs");
    console.say("5. Exit");
}

/// Show the banner, bootstrap a session and, unless the operator exited
/// early, hand it to the dispatcher. Blocks until the operator exits.
pub fn run<B: Backend, C: Console>(api: &B, console: &mut C, short_host: &str) -> Result<()> {
    console.say(BANNER);
    let Some(session) = bootstrap(api, console)? else {
        return Ok(());
    };
    Dispatcher::new(&session, short_host).run(api, console)
}
