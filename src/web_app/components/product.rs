// web_app/components/product.rs - Product display components
//
// Components for displaying products including:
// - ProductCard: Grid card linking to the product page
// - ProductGrid: Grid layout for multiple products
// - ProductDetail: Full product detail view
// - SellerCard: Seller tile on the student home page

use leptos::prelude::*;

use super::common::{query_href, Badge, PriceDisplay, StarRating};
use crate::web_app::model::{Product, Seller};

/// Shorten a description to `max` characters, on a char boundary
pub fn description_preview(description: &str, max: usize) -> String {
    match description.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", description[..cut].trim_end()),
        None => description.to_string(),
    }
}

/// Product card for a product grid
#[component]
pub fn ProductCard(
    product: Product,
    /// Show the seller's name (hidden inside a seller's own catalogue)
    #[prop(default = true)]
    show_seller: bool,
    /// Page the card opens, given the product id as `?id=`
    #[prop(default = "/viewproduct")]
    link_to: &'static str,
) -> impl IntoView {
    let href = query_href(link_to, "id", &product.id);
    let preview = description_preview(&product.description, 120);
    let seller = product.seller_name().map(str::to_string).filter(|_| show_seller);
    let in_stock = product.in_stock();

    view! {
        <a
            href=href
            class="group bg-white rounded-xl shadow-sm hover:shadow-xl \
                   transition-all duration-300 border border-gray-100 \
                   flex flex-col h-full overflow-hidden transform hover:-translate-y-1"
        >
            <div class="h-48 bg-gray-100 flex items-center justify-center text-gray-300 overflow-hidden">
                {match product.image.clone() {
                    Some(src) => view! {
                        <img src=src alt=product.product_name.clone() class="h-full w-full object-cover" />
                    }.into_any(),
                    None => view! { <span class="text-4xl">"📦"</span> }.into_any(),
                }}
            </div>

            <div class="p-5 flex flex-col flex-1">
                <div class="flex justify-between items-start mb-3">
                    {product.rating.map(|rating| view! { <StarRating rating=rating show_value=false /> })}
                    <PriceDisplay price=product.cost highlight=true />
                </div>

                <h3 class="font-bold text-gray-900 mb-2 line-clamp-2 text-lg group-hover:text-indigo-600 transition-colors">
                    {product.product_name.clone()}
                </h3>

                <p class="text-gray-600 text-sm mb-4 line-clamp-3 flex-1">{preview}</p>

                <div class="flex justify-between items-center text-xs text-gray-500 pt-3 border-t border-gray-100">
                    <span class="text-gray-400">{product.category.clone()}</span>
                    {seller.map(|name| view! {
                        <span class="font-medium bg-gray-100 px-2 py-1 rounded text-gray-600">{name}</span>
                    })}
                </div>

                <div class="mt-3">
                    {if in_stock {
                        view! { <Badge variant="green">{format!("{} in stock", product.quantity)}</Badge> }.into_any()
                    } else {
                        view! { <Badge variant="red">"Out of stock"</Badge> }.into_any()
                    }}
                </div>
            </div>
        </a>
    }
}

/// Grid of product cards
#[component]
pub fn ProductGrid(
    #[prop(into)]
    products: Signal<Vec<Product>>,
    #[prop(default = true)]
    show_seller: bool,
    #[prop(default = "/viewproduct")]
    link_to: &'static str,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
            <For
                each=move || products.get()
                key=|p| p.id.clone()
                children=move |product| view! { <ProductCard product=product show_seller=show_seller link_to=link_to /> }
            />
        </div>
    }
}

/// Product detail view
///
/// Everything about one product; purchase controls are passed in as children.
#[component]
pub fn ProductDetail(
    product: Product,
    children: Children,
) -> impl IntoView {
    let seller = product.seller_name().map(str::to_string);

    view! {
        <div class="flex flex-col md:flex-row gap-8">
            <div class="w-full md:w-1/3 aspect-square bg-gray-100 rounded-xl flex items-center justify-center text-gray-300 overflow-hidden">
                {match product.image.clone() {
                    Some(src) => view! { <img src=src alt="" class="h-full w-full object-cover" /> }.into_any(),
                    None => view! { <span class="text-6xl">"📦"</span> }.into_any(),
                }}
            </div>

            <div class="flex-1 space-y-4">
                <div class="flex justify-between items-start gap-4">
                    <div>
                        <h2 class="text-3xl font-bold text-gray-900 leading-tight mb-2">
                            {product.product_name.clone()}
                        </h2>
                        <div class="flex items-center gap-3 text-sm">
                            <span class="text-gray-500">{product.category.clone()}</span>
                            {seller.map(|name| {
                                let href = query_href("/sellerproducts", "seller", &name);
                                view! {
                                    <a href=href class="font-semibold text-indigo-600 hover:underline">
                                        "Sold by " {name}
                                    </a>
                                }
                            })}
                        </div>
                    </div>
                    <PriceDisplay price=product.cost highlight=true />
                </div>

                {product.rating.map(|rating| view! { <StarRating rating=rating /> })}

                {if product.in_stock() {
                    view! {
                        <Badge variant="green">{format!("{} available", product.quantity)}</Badge>
                    }.into_any()
                } else {
                    view! { <Badge variant="red">"Out of stock"</Badge> }.into_any()
                }}

                <p class="text-gray-600 leading-relaxed">{product.description.clone()}</p>

                {children()}
            </div>
        </div>
    }
}

/// Seller tile linking to the seller's catalogue
#[component]
pub fn SellerCard(seller: Seller) -> impl IntoView {
    let href = query_href("/sellerproducts", "seller", &seller.username);

    view! {
        <a
            href=href
            class="bg-white rounded-xl shadow-sm hover:shadow-lg transition-shadow border border-gray-100 p-5 flex gap-4 items-center"
        >
            <div class="h-14 w-14 rounded-full bg-indigo-50 flex items-center justify-center text-2xl overflow-hidden">
                {match seller.image.clone() {
                    Some(src) => view! { <img src=src alt="" class="h-full w-full object-cover" /> }.into_any(),
                    None => view! { <span>"🏪"</span> }.into_any(),
                }}
            </div>
            <div class="min-w-0">
                <h3 class="font-bold text-gray-900 truncate">{seller.username.clone()}</h3>
                <div class="flex flex-wrap gap-1 mt-1">
                    {seller.categories.into_iter().map(|c| view! { <Badge variant="blue">{c}</Badge> }).collect_view()}
                </div>
            </div>
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_preview() {
        assert_eq!(description_preview("short", 120), "short");
        assert_eq!(description_preview("abcdef ghij", 7), "abcdef...");
        // Multi-byte characters are never split
        assert_eq!(description_preview("ééééé", 2), "éé...");
    }
}
