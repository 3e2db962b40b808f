//! Maple Market terminal storefront.
//!
//! An interactive shell over the Maple Market backend: browse and search
//! the catalog, manage a cart, check out, review order history, and (for
//! administrators) maintain the catalog and read the sales dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a local backend with defaults from the environment
//! maple-storefront
//!
//! # Point at another backend and a wider catalog page
//! maple-storefront --base-url https://shop.example.com --page-size 12
//! ```
//!
//! Type `help` at the prompt for the command list.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write as _};

use clap::Parser;
use maple_market_core::{Price, ProductId, UserId};
use maple_market_storefront::api::{BackendClient, NewProduct};
use maple_market_storefront::pages::{
    CatalogPage, CheckoutPage, ForgotPasswordForm, LoginForm, OrderHistoryPage, ProfilePage,
    RegisterForm, SalesPage,
};
use maple_market_storefront::router::Route;
use maple_market_storefront::{App, StorefrontConfig};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maple-storefront")]
#[command(author, version, about = "Maple Market terminal storefront")]
struct Cli {
    /// Backend origin, overriding STOREFRONT_API_BASE_URL
    #[arg(long)]
    base_url: Option<url::Url>,

    /// Catalog page size, overriding STOREFRONT_PAGE_SIZE
    #[arg(long)]
    page_size: Option<u32>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Storefront exited with an error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .init();

    let client = BackendClient::new(&config)?;
    let mut app = App::new(client);
    app.bootstrap().await;

    let mut shell = Shell::new(app, &config);

    println!("Maple Market - connected to {}", config.api_base_url);
    if let Some(user) = shell.app.session().user() {
        println!("Welcome back, {}.", user.username);
    }
    shell.enter_current().await;
    shell.render();

    loop {
        print!("{}> ", shell.app.current_route().path());
        io::stdout().flush()?;
        let Some(line) = read_line()? else {
            break;
        };
        if !shell.dispatch(&line).await {
            break;
        }
    }

    println!("Bye.");
    Ok(())
}

/// Read one trimmed line from stdin; `None` on end of input.
fn read_line() -> io::Result<Option<String>> {
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_owned()))
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    Ok(read_line()?.unwrap_or_default())
}

/// The interactive shell: the application root plus one state value per
/// page, re-entered whenever its route is displayed.
struct Shell {
    app: App<BackendClient>,
    catalog: CatalogPage,
    orders: OrderHistoryPage,
    sales: SalesPage,
    checkout: CheckoutPage,
}

impl Shell {
    fn new(app: App<BackendClient>, config: &StorefrontConfig) -> Self {
        Self {
            app,
            catalog: CatalogPage::new(config.page_size),
            orders: OrderHistoryPage::new(),
            sales: SalesPage::new(),
            checkout: CheckoutPage::new(),
        }
    }

    /// Handle one command line. Returns `false` to leave the shell.
    async fn dispatch(&mut self, line: &str) -> bool {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => return false,
            "go" => self.go(rest).await,
            "search" => {
                self.catalog.set_keyword_input(rest);
                self.catalog.search(self.app.api(), self.app.session()).await;
                self.render();
            }
            "page" => self.page(rest).await,
            "add" => self.add_to_cart(rest),
            "fav" => self.toggle_favorite(rest).await,
            "remove" => self.remove_cart_line(rest),
            "clear" => {
                self.app.clear_cart();
                println!("Cart cleared.");
            }
            "checkout" => {
                self.app.checkout(&mut self.checkout).await;
                if let Some(message) = self.checkout.message() {
                    println!("{message}");
                }
            }
            "login" => self.login().await,
            "logout" => self.logout().await,
            "register" => self.register().await,
            "forgot" => self.forgot_password().await,
            "profile" => self.edit_profile().await,
            "product" => self.product(rest).await,
            other => println!("Unknown command `{other}`. Type `help` for the list."),
        }
        true
    }

    async fn go(&mut self, path: &str) {
        match self.app.navigate(path) {
            Ok(_) => {
                self.enter_current().await;
                self.render();
            }
            Err(message) => println!("{message}"),
        }
    }

    /// Fetch fresh data for whatever route is current.
    async fn enter_current(&mut self) {
        match self.app.current_route() {
            Route::Home => {
                self.catalog.enter(self.app.api(), self.app.session()).await;
            }
            Route::OrderHistory => {
                self.orders.enter(self.app.api(), self.app.session()).await;
            }
            Route::Sales => {
                self.sales.enter(self.app.api(), self.app.session()).await;
            }
            _ => {}
        }
    }

    async fn page(&mut self, argument: &str) {
        match argument {
            "next" => self.catalog.next_page(self.app.api(), self.app.session()).await,
            "prev" => {
                self.catalog
                    .previous_page(self.app.api(), self.app.session())
                    .await;
            }
            raw => match raw.parse::<i64>() {
                Ok(target) => {
                    self.catalog
                        .go_to_page(self.app.api(), self.app.session(), target)
                        .await;
                }
                Err(_) => {
                    println!("Usage: page next | page prev | page <number>");
                    return;
                }
            },
        }
        self.render();
    }

    fn add_to_cart(&mut self, argument: &str) {
        let Some(product) = self.catalog_row(argument) else {
            return;
        };
        let name = product.name.clone();
        self.app.add_to_cart(product);
        println!("Added {name} to the cart ({} lines).", self.app.cart().len());
    }

    async fn toggle_favorite(&mut self, argument: &str) {
        let Some(id) = self.catalog_row(argument).map(|p| p.id) else {
            return;
        };
        match self
            .catalog
            .toggle_favorite(self.app.api(), self.app.session(), id)
            .await
        {
            Ok(()) => self.render(),
            Err(message) => println!("{message}"),
        }
    }

    /// Resolve a 1-based catalog row number to its product.
    fn catalog_row(&self, argument: &str) -> Option<maple_market_storefront::models::Product> {
        let row: usize = match argument.parse() {
            Ok(row) => row,
            Err(_) => {
                println!("Give the row number shown in the catalog listing.");
                return None;
            }
        };
        let product = row
            .checked_sub(1)
            .and_then(|index| self.catalog.products().get(index));
        match product {
            Some(product) => Some(product.clone()),
            None => {
                println!("No catalog row {row} on this page.");
                None
            }
        }
    }

    fn remove_cart_line(&mut self, argument: &str) {
        let Ok(row) = argument.parse::<usize>() else {
            println!("Give the line number shown in the cart listing.");
            return;
        };
        match row.checked_sub(1).and_then(|index| self.app.remove_cart_line(index)) {
            Some(line) => println!(
                "Removed {}. Cart total is now {}.",
                line.product.name,
                self.app.cart().total()
            ),
            None => println!("No cart line {row}."),
        }
    }

    async fn login(&mut self) {
        let mut form = LoginForm::new(self.app.api().base_url());
        println!("Solve the captcha at: {}", form.captcha_image());
        let Ok(username) = prompt("Username") else { return };
        let Ok(password) = prompt("Password") else { return };
        let Ok(captcha) = prompt("Captcha") else { return };
        form.username = username;
        form.set_password(password);
        form.captcha = captcha;

        match self.app.sign_in(&mut form).await {
            Ok(message) => {
                println!("{message}");
                self.enter_current().await;
            }
            Err(message) => println!("{message}"),
        }
    }

    async fn logout(&mut self) {
        if let Some(warning) = self.app.sign_out().await {
            println!("{warning}");
        }
        println!("Signed out.");
        self.enter_current().await;
    }

    async fn register(&mut self) {
        let mut form = RegisterForm::new();
        let Ok(username) = prompt("Username") else { return };
        let Ok(password) = prompt("Password") else { return };
        let Ok(confirm) = prompt("Confirm password") else { return };
        let Ok(name) = prompt("Name") else { return };
        let Ok(id_number) = prompt("ID number") else { return };
        let Ok(phone) = prompt("Phone") else { return };
        let Ok(birthday) = prompt("Birthday (YYYY-MM-DD, blank to skip)") else {
            return;
        };
        form.username = username;
        form.set_password(password);
        form.set_confirm_password(confirm);
        form.name = name;
        form.id_number = id_number;
        form.phone = phone;
        if !birthday.is_empty() {
            match birthday.parse() {
                Ok(date) => form.birthday = Some(date),
                Err(_) => {
                    println!("Could not read that date; expected YYYY-MM-DD.");
                    return;
                }
            }
        }

        match form.submit(self.app.api()).await {
            Ok(message) | Err(message) => println!("{message}"),
        }
    }

    async fn forgot_password(&mut self) {
        let mut form = ForgotPasswordForm::new();
        let Ok(username) = prompt("Username") else { return };
        let Ok(id_number) = prompt("ID number") else { return };
        let Ok(phone) = prompt("Phone") else { return };
        let Ok(new_password) = prompt("New password") else { return };
        let Ok(confirm) = prompt("Confirm new password") else { return };
        form.username = username;
        form.id_number = id_number;
        form.phone = phone;
        form.set_new_password(new_password);
        form.set_confirm_new_password(confirm);

        match form.submit(self.app.api()).await {
            Ok(message) | Err(message) => println!("{message}"),
        }
    }

    async fn edit_profile(&mut self) {
        let mut page = ProfilePage::for_session(self.app.session());
        println!(
            "Editing profile (current name: {}, phone: {}).",
            if page.name.is_empty() { "-" } else { &page.name },
            if page.phone.is_empty() { "-" } else { &page.phone },
        );
        let Ok(name) = prompt("Name") else { return };
        let Ok(phone) = prompt("Phone") else { return };
        let Ok(birthday) = prompt("Birthday (YYYY-MM-DD, blank to keep)") else {
            return;
        };
        if !name.is_empty() {
            page.name = name;
        }
        if !phone.is_empty() {
            page.phone = phone;
        }
        if !birthday.is_empty() {
            match birthday.parse() {
                Ok(date) => page.birthday = Some(date),
                Err(_) => {
                    println!("Could not read that date; expected YYYY-MM-DD.");
                    return;
                }
            }
        }

        match self.app.update_profile(&mut page).await {
            Ok(message) | Err(message) => println!("{message}"),
        }
    }

    async fn product(&mut self, rest: &str) {
        let (action, argument) = match rest.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (rest, ""),
        };
        match action {
            "add" => self.product_add().await,
            "edit" => self.product_edit(argument).await,
            "rm" => self.product_remove(argument).await,
            "delete-account" => self.delete_account(argument).await,
            _ => println!(
                "Usage: product add | product edit <id> | product rm <id> \
                 | product delete-account <id>"
            ),
        }
    }

    async fn product_edit(&mut self, argument: &str) {
        let Ok(raw) = argument.parse::<i32>() else {
            println!("Usage: product edit <id>");
            return;
        };
        let Some(product) = read_product_form() else {
            return;
        };
        match self
            .catalog
            .update_product(self.app.api(), self.app.session(), ProductId::new(raw), product)
            .await
        {
            Ok(message) | Err(message) => println!("{message}"),
        }
        self.render();
    }

    async fn product_add(&mut self) {
        let Some(product) = read_product_form() else {
            return;
        };
        match self
            .catalog
            .create_product(self.app.api(), self.app.session(), product)
            .await
        {
            Ok(message) | Err(message) => println!("{message}"),
        }
        self.render();
    }

    async fn product_remove(&mut self, argument: &str) {
        let Ok(raw) = argument.parse::<i32>() else {
            println!("Usage: product rm <id>");
            return;
        };
        match self
            .catalog
            .delete_product(self.app.api(), self.app.session(), ProductId::new(raw))
            .await
        {
            Ok(message) | Err(message) => println!("{message}"),
        }
        self.render();
    }

    async fn delete_account(&mut self, argument: &str) {
        let Ok(raw) = argument.parse::<i32>() else {
            println!("Usage: product delete-account <id>");
            return;
        };
        let mut page = ProfilePage::for_session(self.app.session());
        match page
            .delete_account(self.app.api(), self.app.session(), UserId::new(raw))
            .await
        {
            Ok(message) | Err(message) => println!("{message}"),
        }
    }

    /// Render the current route from page state alone.
    fn render(&self) {
        match self.app.current_route() {
            Route::Home => self.render_catalog(),
            Route::Cart => self.render_cart(),
            Route::OrderHistory => self.render_orders(),
            Route::Sales => self.render_sales(),
            Route::Login => println!("Type `login` to sign in, `register` to create an account."),
            Route::Register => println!("Type `register` to create an account."),
            Route::ForgotPassword => println!("Type `forgot` to reset a password."),
            Route::Profile => println!("Type `profile` to edit the signed-in profile."),
            Route::NotFound => println!("That page does not exist. Type `go /` for the catalog."),
        }
    }

    fn render_catalog(&self) {
        if let Some(message) = self.catalog.state().error() {
            println!("{message}");
            return;
        }
        let keyword = self.catalog.committed_keyword();
        if keyword.is_empty() {
            println!("Catalog");
        } else {
            println!("Catalog - matching \"{keyword}\"");
        }
        if self.catalog.products().is_empty() {
            println!("  (no products)");
        }
        for (index, product) in self.catalog.products().iter().enumerate() {
            let marker = if self.catalog.favorite_ids().contains(&product.id) {
                '*'
            } else {
                ' '
            };
            println!("{:>3} {marker} {:<30} {}", index + 1, product.name, product.price);
        }
        println!(
            "Page {} of {}.",
            self.catalog.page() + 1,
            self.catalog.total_pages().max(1)
        );
        if !self.catalog.favorite_list().is_empty() {
            let names: Vec<&str> = self
                .catalog
                .favorite_list()
                .iter()
                .map(|p| p.name.as_str())
                .collect();
            println!("Favorites: {}", names.join(", "));
        }
    }

    fn render_cart(&self) {
        let cart = self.app.cart();
        if cart.is_empty() {
            println!("Your cart is empty.");
            return;
        }
        for (index, line) in cart.lines().iter().enumerate() {
            println!(
                "{:>3}   {:<30} {:>3} x {} = {}",
                index + 1,
                line.product.name,
                line.quantity,
                line.product.price,
                line.subtotal()
            );
        }
        println!("Total: {}", cart.total());
    }

    fn render_orders(&self) {
        if let Some(message) = self.orders.state().error() {
            println!("{message}");
            return;
        }
        if self.orders.orders().is_empty() {
            println!("No orders yet.");
            return;
        }
        for order in self.orders.orders() {
            println!("Order #{} - total {}", order.id, order.total);
            for line in &order.lines {
                println!(
                    "      {:<30} {:>3} x {} = {}",
                    line.name,
                    line.quantity,
                    line.unit_price,
                    line.subtotal()
                );
            }
        }
    }

    fn render_sales(&self) {
        if let Some(message) = self.sales.state().error() {
            println!("{message}");
            return;
        }
        if self.sales.is_empty() {
            println!("Nothing sold yet.");
            return;
        }
        let rows = self.sales.rows();
        let widths = maple_market_storefront::pages::sales::bar_widths(rows, 40);
        for (row, width) in rows.iter().zip(widths) {
            println!(
                "{:<30} {:>5} sold {:>10}  {}",
                row.product_name,
                row.total_qty,
                row.total_amount,
                "#".repeat(width)
            );
        }
    }
}

/// Prompt for the fields of a product create/update body.
fn read_product_form() -> Option<NewProduct> {
    let name = prompt("Name").ok()?;
    let raw = prompt("Price").ok()?;
    let price = match raw
        .parse::<Decimal>()
        .map_err(|e| e.to_string())
        .and_then(|amount| Price::new(amount).map_err(|e| e.to_string()))
    {
        Ok(price) => price,
        Err(message) => {
            println!("Could not read that price: {message}");
            return None;
        }
    };
    Some(NewProduct {
        name,
        price,
        image_base64: None,
    })
}

fn print_help() {
    println!(
        "\
Commands:
  go <path>            navigate: / /cart /login /register /forgot-password
                       /profile /orders/history /checksales
  search <keyword>     filter the catalog (blank keyword clears the filter)
  page next|prev|<n>   move through catalog pages
  add <row>            add the numbered catalog row to the cart
  fav <row>            toggle a favorite (signed-in only)
  remove <line>        drop a cart line
  clear                empty the cart
  checkout             submit the whole cart as one order
  login | logout       manage the session
  register | forgot    create an account / reset a password
  profile              edit the signed-in profile
  product add          create a product (admin)
  product edit <id>    replace a product's details (admin)
  product rm <id>      delete a product (admin)
  help | quit"
    );
}
