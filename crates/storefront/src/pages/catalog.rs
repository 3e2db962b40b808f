//! Product catalog workflow: pagination, search, favorites, and the
//! admin catalog-maintenance controls.

use std::collections::BTreeSet;

use maple_market_core::ProductId;
use tracing::warn;

use crate::api::{NewProduct, StorefrontApi};
use crate::models::Product;
use crate::session::Session;

use super::FetchState;

/// State for the `/products` view.
///
/// Keeps the 0-based page index, the fixed page size, the last-known
/// total page count, and a committed search keyword distinct from the
/// live input-box value: the live value only commits on explicit search
/// submission, not on every keystroke.
#[derive(Debug)]
pub struct CatalogPage {
    page: u32,
    size: u32,
    total_pages: u32,
    keyword_input: String,
    committed_keyword: String,
    state: FetchState<Vec<Product>>,
    /// Favorite product ids, driving the toggle-button state.
    favorite_ids: BTreeSet<ProductId>,
    /// Full favorite snapshots, driving the "my favorites" panel.
    favorite_list: Vec<Product>,
}

impl CatalogPage {
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size,
            total_pages: 0,
            keyword_input: String::new(),
            committed_keyword: String::new(),
            state: FetchState::Idle,
            favorite_ids: BTreeSet::new(),
            favorite_list: Vec::new(),
        }
    }

    /// Fetch page 0 with the committed keyword (on entering the view).
    pub async fn enter<A: StorefrontApi>(&mut self, api: &A, session: &Session) {
        let keyword = self.committed_keyword.clone();
        self.load(api, session, 0, keyword).await;
    }

    /// Update the live input-box value without committing it.
    pub fn set_keyword_input(&mut self, value: impl Into<String>) {
        self.keyword_input = value.into();
    }

    /// Commit the live keyword and query from page 0.
    pub async fn search<A: StorefrontApi>(&mut self, api: &A, session: &Session) {
        self.committed_keyword = self.keyword_input.clone();
        let keyword = self.committed_keyword.clone();
        self.load(api, session, 0, keyword).await;
    }

    /// Navigate to `target`. A no-op when the target is negative, beyond
    /// the last known page, or a fetch is already outstanding.
    pub async fn go_to_page<A: StorefrontApi>(&mut self, api: &A, session: &Session, target: i64) {
        if target < 0 || target >= i64::from(self.total_pages) {
            return;
        }
        let keyword = self.committed_keyword.clone();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        self.load(api, session, target as u32, keyword).await;
    }

    /// Navigate one page forward.
    pub async fn next_page<A: StorefrontApi>(&mut self, api: &A, session: &Session) {
        self.go_to_page(api, session, i64::from(self.page) + 1).await;
    }

    /// Navigate one page back.
    pub async fn previous_page<A: StorefrontApi>(&mut self, api: &A, session: &Session) {
        self.go_to_page(api, session, i64::from(self.page) - 1).await;
    }

    async fn load<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &Session,
        page: u32,
        keyword: String,
    ) {
        if self.state.is_loading() {
            return;
        }
        self.state = FetchState::Loading;

        match api.fetch_products(page, self.size, &keyword).await {
            Ok(envelope) if envelope.is_success() && envelope.data.is_some() => {
                // is_some checked above
                if let Some(data) = envelope.data {
                    self.page = data.page;
                    self.total_pages = data.total_pages;
                    self.state = FetchState::Ready(data.products);
                }
            }
            Ok(envelope) => {
                self.total_pages = 0;
                self.state = FetchState::Failed(
                    envelope.message_or("Could not load products.").to_owned(),
                );
            }
            Err(error) => {
                self.total_pages = 0;
                self.state = FetchState::Failed(error.user_message());
            }
        }

        // Favorites track the session, not the fetch outcome: a failed
        // catalog page still shows current favorites for a member.
        if session.is_authenticated() {
            self.refresh_favorites(api).await;
        } else {
            self.favorite_ids.clear();
            self.favorite_list.clear();
        }
    }

    async fn refresh_favorites<A: StorefrontApi>(&mut self, api: &A) {
        match api.favorites().await {
            Ok(envelope) if envelope.is_success() && envelope.data.is_some() => {
                let list = envelope.data.unwrap_or_default();
                self.favorite_ids = list.iter().map(|p| p.id).collect();
                self.favorite_list = list;
            }
            Ok(_) => {
                self.favorite_ids.clear();
                self.favorite_list.clear();
            }
            Err(error) => {
                warn!(error = %error, "could not load favorites");
                self.favorite_ids.clear();
                self.favorite_list.clear();
            }
        }
    }

    /// Toggle the favorite flag for a product.
    ///
    /// The local id set and snapshot list change only after the backend
    /// call succeeds; a failed round trip leaves them exactly as they
    /// were and reports the failure message.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when the user is signed out or the
    /// backend rejects the change.
    pub async fn toggle_favorite<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &Session,
        id: ProductId,
    ) -> Result<(), String> {
        if !session.is_authenticated() {
            return Err("Please sign in to manage favorites.".to_owned());
        }

        if self.favorite_ids.contains(&id) {
            match api.remove_favorite(id).await {
                Ok(envelope) if envelope.is_success() => {
                    self.favorite_ids.remove(&id);
                    self.favorite_list.retain(|p| p.id != id);
                    Ok(())
                }
                Ok(envelope) => {
                    Err(envelope.message_or("Could not remove the favorite.").to_owned())
                }
                Err(error) => Err(error.user_message()),
            }
        } else {
            match api.add_favorite(id).await {
                Ok(envelope) if envelope.is_success() => {
                    self.favorite_ids.insert(id);
                    self.adopt_favorite_snapshot(api, id).await;
                    Ok(())
                }
                Ok(envelope) => {
                    Err(envelope.message_or("Could not add the favorite.").to_owned())
                }
                Err(error) => Err(error.user_message()),
            }
        }
    }

    /// Pull the snapshot for a newly added favorite into the panel list:
    /// from the current page when it is there, otherwise by re-fetching
    /// the favorite list (best effort; the id set is already committed).
    async fn adopt_favorite_snapshot<A: StorefrontApi>(&mut self, api: &A, id: ProductId) {
        let on_page = self.products().iter().find(|p| p.id == id).cloned();
        match on_page {
            Some(product) => {
                if !self.favorite_list.iter().any(|p| p.id == id) {
                    self.favorite_list.push(product);
                }
            }
            None => match api.favorites().await {
                Ok(envelope) if envelope.is_success() && envelope.data.is_some() => {
                    let list = envelope.data.unwrap_or_default();
                    self.favorite_ids = list.iter().map(|p| p.id).collect();
                    self.favorite_list = list;
                }
                Ok(_) => {}
                Err(error) => warn!(error = %error, "could not reload favorites"),
            },
        }
    }

    /// Create a product and re-fetch the current page (admin only).
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when the role is missing or the
    /// backend rejects the product.
    pub async fn create_product<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &Session,
        product: NewProduct,
    ) -> Result<String, String> {
        if !session.is_admin() {
            return Err("Administrator role required.".to_owned());
        }
        match api.create_product(product).await {
            Ok(envelope) if envelope.is_success() => {
                let message = envelope.message_or("Product created.").to_owned();
                self.refetch_current(api, session).await;
                Ok(message)
            }
            Ok(envelope) => Err(envelope.message_or("Could not create the product.").to_owned()),
            Err(error) => Err(error.user_message()),
        }
    }

    /// Replace a product's details and re-fetch the current page
    /// (admin only).
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when the role is missing or the
    /// backend rejects the update.
    pub async fn update_product<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &Session,
        id: ProductId,
        product: NewProduct,
    ) -> Result<String, String> {
        if !session.is_admin() {
            return Err("Administrator role required.".to_owned());
        }
        match api.update_product(id, product).await {
            Ok(envelope) if envelope.is_success() => {
                let message = envelope.message_or("Product updated.").to_owned();
                self.refetch_current(api, session).await;
                Ok(message)
            }
            Ok(envelope) => Err(envelope.message_or("Could not update the product.").to_owned()),
            Err(error) => Err(error.user_message()),
        }
    }

    /// Delete a product and re-fetch the current page (admin only).
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when the role is missing or the
    /// backend rejects the deletion.
    pub async fn delete_product<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &Session,
        id: ProductId,
    ) -> Result<String, String> {
        if !session.is_admin() {
            return Err("Administrator role required.".to_owned());
        }
        match api.delete_product(id).await {
            Ok(envelope) if envelope.is_success() => {
                let message = envelope.message_or("Product deleted.").to_owned();
                self.refetch_current(api, session).await;
                Ok(message)
            }
            Ok(envelope) => Err(envelope.message_or("Could not delete the product.").to_owned()),
            Err(error) => Err(error.user_message()),
        }
    }

    /// Re-fetch the page currently shown; the canonical list is never
    /// patched locally after a mutation.
    async fn refetch_current<A: StorefrontApi>(&mut self, api: &A, session: &Session) {
        let keyword = self.committed_keyword.clone();
        let page = self.page;
        self.load(api, session, page, keyword).await;
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.state.ready().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn keyword_input(&self) -> &str {
        &self.keyword_input
    }

    #[must_use]
    pub fn committed_keyword(&self) -> &str {
        &self.committed_keyword
    }

    #[must_use]
    pub const fn favorite_ids(&self) -> &BTreeSet<ProductId> {
        &self.favorite_ids
    }

    #[must_use]
    pub fn favorite_list(&self) -> &[Product] {
        &self.favorite_list
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<Vec<Product>> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Ack, ApiError, Envelope, MockStorefrontApi};
    use crate::models::{ProductPage, User};
    use maple_market_core::{Price, Role, RoleSet};
    use rust_decimal::Decimal;

    fn product(id: i32, name: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::new(Decimal::from(price)).expect("non-negative"),
            image_base64: None,
        }
    }

    fn page_envelope(products: Vec<Product>, page: u32, total_pages: u32) -> Envelope<ProductPage> {
        Envelope::success(Some(ProductPage {
            size: 6,
            total_elements: u64::from(total_pages) * 6,
            last: page + 1 >= total_pages,
            products,
            page,
            total_pages,
        }))
    }

    fn guest() -> Session {
        Session::unauthenticated()
    }

    fn member() -> Session {
        let mut session = Session::unauthenticated();
        let mut user = User::from_probe("alice");
        user.roles = [Role::User].into_iter().collect::<RoleSet>();
        session.establish(user);
        session
    }

    fn admin() -> Session {
        let mut session = Session::unauthenticated();
        let mut user = User::from_probe("admin");
        user.roles = [Role::Admin, Role::User].into_iter().collect::<RoleSet>();
        session.establish(user);
        session
    }

    #[tokio::test]
    async fn test_enter_populates_page_state() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .withf(|page, size, keyword| *page == 0 && *size == 6 && keyword.is_empty())
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 3)));

        let mut catalog = CatalogPage::new(6);
        catalog.enter(&api, &guest()).await;

        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.page(), 0);
        assert_eq!(catalog.total_pages(), 3);
        assert!(catalog.favorite_ids().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_list_and_total() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 3)));
        let mut catalog = CatalogPage::new(6);
        catalog.enter(&api, &guest()).await;

        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products().times(1).return_once(|_, _, _| {
            Err(ApiError::Rejected {
                status: 500,
                message: "database down".to_owned(),
            })
        });
        catalog.search(&api, &guest()).await;

        assert!(catalog.products().is_empty());
        assert_eq!(catalog.total_pages(), 0);
        assert_eq!(catalog.state().error(), Some("database down"));
    }

    #[tokio::test]
    async fn test_non_success_envelope_uses_backend_message() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(Envelope::failure(500, "catalog unavailable")));

        let mut catalog = CatalogPage::new(6);
        catalog.enter(&api, &guest()).await;

        assert_eq!(catalog.state().error(), Some("catalog unavailable"));
        assert_eq!(catalog.total_pages(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_navigation_is_noop() {
        let mut api = MockStorefrontApi::new();
        // Exactly one fetch: the two bad navigations must not call out.
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 3)));

        let mut catalog = CatalogPage::new(6);
        catalog.enter(&api, &guest()).await;

        catalog.go_to_page(&api, &guest(), -1).await;
        catalog.go_to_page(&api, &guest(), 3).await;

        assert_eq!(catalog.page(), 0);
        assert_eq!(catalog.products().len(), 1);
    }

    #[tokio::test]
    async fn test_search_commits_live_keyword_from_page_zero() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .withf(|page, _, keyword| *page == 0 && keyword == "apple")
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));

        let mut catalog = CatalogPage::new(6);
        catalog.set_keyword_input("apple");
        assert_eq!(catalog.committed_keyword(), "");

        catalog.search(&api, &guest()).await;
        assert_eq!(catalog.committed_keyword(), "apple");
    }

    #[tokio::test]
    async fn test_successful_fetch_refreshes_favorites_when_signed_in() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));
        api.expect_favorites()
            .times(1)
            .return_once(|| Ok(Envelope::success(Some(vec![product(2, "Pear", 20)]))));

        let mut catalog = CatalogPage::new(6);
        catalog.enter(&api, &member()).await;

        assert!(catalog.favorite_ids().contains(&ProductId::new(2)));
        assert_eq!(catalog.favorite_list().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_still_refreshes_favorites_when_signed_in() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(Envelope::failure(500, "catalog unavailable")));
        api.expect_favorites()
            .times(1)
            .return_once(|| Ok(Envelope::success(Some(vec![product(2, "Pear", 20)]))));

        let mut catalog = CatalogPage::new(6);
        catalog.enter(&api, &member()).await;

        assert_eq!(catalog.state().error(), Some("catalog unavailable"));
        assert!(catalog.favorite_ids().contains(&ProductId::new(2)));
        assert_eq!(catalog.favorite_list().len(), 1);
    }

    #[tokio::test]
    async fn test_favorite_add_off_page_reloads_snapshot_list() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));
        api.expect_favorites()
            .times(1)
            .return_once(|| Ok(Envelope::success(Some(vec![]))));
        api.expect_add_favorite()
            .withf(|id| *id == ProductId::new(9))
            .times(1)
            .return_once(|_| Ok(Ack::success(None)));
        // Product 9 is not on the page, so the snapshot comes from a reload.
        api.expect_favorites()
            .times(1)
            .return_once(|| Ok(Envelope::success(Some(vec![product(9, "Plum", 15)]))));

        let mut catalog = CatalogPage::new(6);
        let session = member();
        catalog.enter(&api, &session).await;

        catalog
            .toggle_favorite(&api, &session, ProductId::new(9))
            .await
            .expect("toggle succeeds");
        assert!(catalog.favorite_ids().contains(&ProductId::new(9)));
        assert_eq!(catalog.favorite_list().len(), 1);
        assert_eq!(catalog.favorite_list()[0].name, "Plum");
    }

    #[tokio::test]
    async fn test_signed_out_fetch_clears_favorites() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));
        api.expect_favorites()
            .times(1)
            .return_once(|| Ok(Envelope::success(Some(vec![product(2, "Pear", 20)]))));
        let mut catalog = CatalogPage::new(6);
        catalog.enter(&api, &member()).await;
        assert!(!catalog.favorite_ids().is_empty());

        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));
        catalog.enter(&api, &guest()).await;

        assert!(catalog.favorite_ids().is_empty());
        assert!(catalog.favorite_list().is_empty());
    }

    #[tokio::test]
    async fn test_favorite_add_commits_only_after_success() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));
        api.expect_favorites()
            .times(1)
            .return_once(|| Ok(Envelope::success(Some(vec![]))));
        api.expect_add_favorite()
            .withf(|id| *id == ProductId::new(1))
            .times(1)
            .return_once(|_| Ok(Ack::success(None)));

        let mut catalog = CatalogPage::new(6);
        let session = member();
        catalog.enter(&api, &session).await;

        catalog
            .toggle_favorite(&api, &session, ProductId::new(1))
            .await
            .expect("toggle succeeds");
        assert!(catalog.favorite_ids().contains(&ProductId::new(1)));
        // Snapshot adopted from the current page without another fetch.
        assert_eq!(catalog.favorite_list().len(), 1);
    }

    #[tokio::test]
    async fn test_favorite_add_failure_rolls_nothing_in() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));
        api.expect_favorites()
            .times(1)
            .return_once(|| Ok(Envelope::success(Some(vec![]))));
        api.expect_add_favorite().times(1).return_once(|_| {
            Err(ApiError::Rejected {
                status: 500,
                message: "favorites unavailable".to_owned(),
            })
        });

        let mut catalog = CatalogPage::new(6);
        let session = member();
        catalog.enter(&api, &session).await;

        let result = catalog
            .toggle_favorite(&api, &session, ProductId::new(1))
            .await;
        assert_eq!(result, Err("favorites unavailable".to_owned()));
        assert!(!catalog.favorite_ids().contains(&ProductId::new(1)));
        assert!(catalog.favorite_list().is_empty());
    }

    #[tokio::test]
    async fn test_favorite_remove_commits_after_success() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(1)
            .return_once(|_, _, _| Ok(page_envelope(vec![product(2, "Pear", 20)], 0, 1)));
        api.expect_favorites()
            .times(1)
            .return_once(|| Ok(Envelope::success(Some(vec![product(2, "Pear", 20)]))));
        api.expect_remove_favorite()
            .withf(|id| *id == ProductId::new(2))
            .times(1)
            .return_once(|_| Ok(Ack::success(None)));

        let mut catalog = CatalogPage::new(6);
        let session = member();
        catalog.enter(&api, &session).await;

        catalog
            .toggle_favorite(&api, &session, ProductId::new(2))
            .await
            .expect("toggle succeeds");
        assert!(catalog.favorite_ids().is_empty());
        assert!(catalog.favorite_list().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_requires_authentication() {
        let api = MockStorefrontApi::new();
        let mut catalog = CatalogPage::new(6);

        let result = catalog
            .toggle_favorite(&api, &guest(), ProductId::new(1))
            .await;
        assert_eq!(result, Err("Please sign in to manage favorites.".to_owned()));
    }

    #[tokio::test]
    async fn test_create_product_requires_admin_role() {
        let api = MockStorefrontApi::new();
        let mut catalog = CatalogPage::new(6);

        let result = catalog
            .create_product(
                &api,
                &member(),
                NewProduct {
                    name: "Apple".to_owned(),
                    price: Price::ZERO,
                    image_base64: None,
                },
            )
            .await;
        assert_eq!(result, Err("Administrator role required.".to_owned()));
    }

    #[tokio::test]
    async fn test_create_product_refetches_current_page() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(2)
            .returning(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));
        api.expect_favorites()
            .times(2)
            .returning(|| Ok(Envelope::success(Some(vec![]))));
        api.expect_create_product()
            .times(1)
            .return_once(|_| Ok(Envelope::success(Some(product(9, "Plum", 15)))));

        let mut catalog = CatalogPage::new(6);
        let session = admin();
        catalog.enter(&api, &session).await;

        let message = catalog
            .create_product(
                &api,
                &session,
                NewProduct {
                    name: "Plum".to_owned(),
                    price: Price::new(Decimal::from(15)).expect("non-negative"),
                    image_base64: None,
                },
            )
            .await
            .expect("create succeeds");
        assert_eq!(message, "Product created.");
    }

    #[tokio::test]
    async fn test_update_product_refetches_current_page() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_products()
            .times(2)
            .returning(|_, _, _| Ok(page_envelope(vec![product(1, "Apple", 30)], 0, 1)));
        api.expect_favorites()
            .times(2)
            .returning(|| Ok(Envelope::success(Some(vec![]))));
        api.expect_update_product()
            .withf(|id, product| *id == ProductId::new(1) && product.name == "Green Apple")
            .times(1)
            .return_once(|_, _| Ok(Envelope::success(Some(product(1, "Green Apple", 32)))));

        let mut catalog = CatalogPage::new(6);
        let session = admin();
        catalog.enter(&api, &session).await;

        let message = catalog
            .update_product(
                &api,
                &session,
                ProductId::new(1),
                NewProduct {
                    name: "Green Apple".to_owned(),
                    price: Price::new(Decimal::from(32)).expect("non-negative"),
                    image_base64: None,
                },
            )
            .await
            .expect("update succeeds");
        assert_eq!(message, "Product updated.");
    }

    #[tokio::test]
    async fn test_update_product_requires_admin_role() {
        let api = MockStorefrontApi::new();
        let mut catalog = CatalogPage::new(6);

        let result = catalog
            .update_product(
                &api,
                &member(),
                ProductId::new(1),
                NewProduct {
                    name: "Apple".to_owned(),
                    price: Price::ZERO,
                    image_base64: None,
                },
            )
            .await;
        assert_eq!(result, Err("Administrator role required.".to_owned()));
    }

    #[tokio::test]
    async fn test_delete_product_surfaces_backend_rejection() {
        let mut api = MockStorefrontApi::new();
        api.expect_delete_product()
            .times(1)
            .return_once(|_| Ok(Envelope::failure(403, "not allowed")));

        let mut catalog = CatalogPage::new(6);
        let result = catalog
            .delete_product(&api, &admin(), ProductId::new(1))
            .await;
        assert_eq!(result, Err("not allowed".to_owned()));
    }
}
