//! Product list pipeline: load, search, paginate and the two-step delete.

use crate::domain::notification::Notification;
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::dto::products::{ProductRow, ProductsPageData, ProductsQuery};
use crate::gateway::{ProductReader, ProductWriter};
use crate::pagination::{self, DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::ServiceResult;

pub const LOAD_ERROR_MESSAGE: &str = "Error al cargar los productos";
pub const DELETE_SUCCESS_MESSAGE: &str = "Eliminado con éxito";
pub const DELETE_ERROR_MESSAGE: &str = "No se pudo eliminar el producto";

/// Products whose name, description or displayed dates contain `query`,
/// ignoring case. A blank query keeps every product.
pub fn derive_filtered(all: &[Product], query: &str) -> Vec<Product> {
    if query.trim().is_empty() {
        return all.to_vec();
    }

    let needle = query.to_lowercase();
    all.iter()
        .filter(|product| product.matches(&needle))
        .cloned()
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Ready,
    /// Loading failed; holds the message shown in place of the table.
    Failed(String),
}

/// State of the product list view.
///
/// `all` mirrors the last successful fetch, `filtered` is derived from it and
/// the query, and the visible window is derived from `filtered` and the page.
#[derive(Debug)]
pub struct ProductList {
    status: ListStatus,
    all: Vec<Product>,
    filtered: Vec<Product>,
    query: String,
    current_page: usize,
    items_per_page: usize,
    pending_delete: Option<ProductId>,
}

impl Default for ProductList {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductList {
    pub fn new() -> Self {
        Self {
            status: ListStatus::Loading,
            all: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            pending_delete: None,
        }
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn all(&self) -> &[Product] {
        &self.all
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn pending_delete(&self) -> Option<&ProductId> {
        self.pending_delete.as_ref()
    }

    /// Fetches the full collection and re-applies the active query.
    pub async fn load<R>(&mut self, gateway: &R)
    where
        R: ProductReader + ?Sized,
    {
        self.status = ListStatus::Loading;

        match gateway.list_products().await {
            Ok(products) => {
                self.all = products;
                self.filtered = derive_filtered(&self.all, &self.query);
                self.status = ListStatus::Ready;
            }
            Err(err) => {
                log::error!("Failed to load products: {err}");
                self.status = ListStatus::Failed(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.filtered = derive_filtered(&self.all, &self.query);
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    pub fn current_page_items(&self) -> &[Product] {
        pagination::window(&self.filtered, self.current_page, self.items_per_page)
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered.len(), self.items_per_page)
    }

    /// Records the intent to delete `id`; nothing is sent until confirmed.
    /// A later request replaces an earlier unconfirmed one.
    pub fn request_delete(&mut self, id: ProductId) {
        if let Some(previous) = self.pending_delete.replace(id) {
            log::debug!("Replacing pending deletion of product {previous}");
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Product targeted by the pending deletion, if it is in the loaded list.
    pub fn pending_delete_product(&self) -> Option<&Product> {
        let id = self.pending_delete.as_ref()?;
        self.all.iter().find(|product| &product.id == id)
    }

    /// Deletes the pending product and reloads the list on success.
    ///
    /// Returns `None` when no deletion was requested.
    pub async fn confirm_delete<G>(&mut self, gateway: &G) -> Option<Notification>
    where
        G: ProductReader + ProductWriter + ?Sized,
    {
        let id = self.pending_delete.take()?;

        match gateway.delete_product(&id).await {
            Ok(()) => {
                log::info!("Deleted product {id}");
                self.load(gateway).await;
                Some(Notification::success(DELETE_SUCCESS_MESSAGE))
            }
            Err(err) => {
                log::error!("Failed to delete product {id}: {err}");
                Some(Notification::error(DELETE_ERROR_MESSAGE))
            }
        }
    }

    /// Snapshot of the visible window for rendering.
    pub fn to_page_data(&self) -> ProductsPageData {
        let rows = self
            .current_page_items()
            .iter()
            .map(ProductRow::from)
            .collect();

        let load_error = match &self.status {
            ListStatus::Failed(message) => Some(message.clone()),
            _ => None,
        };

        ProductsPageData {
            products: Paginated::new(
                rows,
                self.current_page,
                self.items_per_page,
                self.filtered.len(),
            ),
            search_query: Some(self.query.clone()).filter(|q| !q.trim().is_empty()),
            load_error,
            pending_delete: self.pending_delete_product().map(ProductRow::from),
        }
    }
}

/// Outcome of a confirmed deletion.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The product was removed and the list reloaded with the same query.
    Deleted {
        page: ProductsPageData,
        notification: Notification,
    },
    /// The backend refused the deletion; nothing was reloaded.
    Failed(Notification),
}

/// Applies page size, search query and page, in that order.
fn apply_query(list: &mut ProductList, query: &ProductsQuery) {
    if let Some(per_page) = query.per_page {
        list.set_items_per_page(per_page);
    }
    list.set_query(query.search_term());
    if let Some(page) = query.page {
        list.set_page(page);
    }
}

/// Activates the list view: loads, then applies the query parameters.
async fn activate<R>(gateway: &R, query: &ProductsQuery) -> ProductList
where
    R: ProductReader + ?Sized,
{
    let mut list = ProductList::new();
    list.load(gateway).await;
    apply_query(&mut list, query);
    list
}

/// Loads the product list page.
pub async fn load_products_page<R>(gateway: &R, query: &ProductsQuery) -> ProductsPageData
where
    R: ProductReader + ?Sized,
{
    activate(gateway, query).await.to_page_data()
}

/// Loads the list page with a deletion awaiting confirmation.
pub async fn load_delete_confirmation<R>(
    gateway: &R,
    product_id: &str,
    query: &ProductsQuery,
) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + ?Sized,
{
    let product_id = ProductId::new(product_id)?;

    let mut list = activate(gateway, query).await;
    list.request_delete(product_id);

    Ok(list.to_page_data())
}

/// Confirms the deletion of `product_id` from the list described by `query`.
///
/// On success the list reload is returned for rendering, otherwise only the
/// error notification; gateway failures never propagate.
pub async fn delete_product<G>(
    gateway: &G,
    product_id: &str,
    query: &ProductsQuery,
) -> ServiceResult<DeleteOutcome>
where
    G: ProductReader + ProductWriter + ?Sized,
{
    let product_id = ProductId::new(product_id)?;

    let mut list = ProductList::new();
    apply_query(&mut list, query);
    list.request_delete(product_id);

    let notification = match list.confirm_delete(gateway).await {
        Some(notification) if !notification.is_error() => notification,
        Some(notification) => return Ok(DeleteOutcome::Failed(notification)),
        None => return Ok(DeleteOutcome::Failed(Notification::error(DELETE_ERROR_MESSAGE))),
    };

    // Removing the only row of the last page moves back one page.
    let last_page = list.total_pages().max(1);
    if list.current_page() > last_page {
        list.set_page(last_page);
    }

    Ok(DeleteOutcome::Deleted {
        page: list.to_page_data(),
        notification,
    })
}
