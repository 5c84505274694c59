//! `wok review`: review CRUD against the employees service.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use wok_api::CachedStoreReviews;
use wok_schemas::Review;

use super::render;

#[derive(Subcommand)]
pub enum ReviewCmd {
    /// Leave a review on a received order
    Create {
        #[arg(long)]
        store: String,

        #[arg(long)]
        order: String,

        /// 0.0 to 5.0
        #[arg(long)]
        rating: f32,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Update an existing review
    Update {
        #[arg(long)]
        review: String,

        #[arg(long)]
        rating: f32,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Delete a review
    Delete {
        #[arg(long)]
        review: String,
    },

    /// List a store's reviews
    List {
        #[arg(long)]
        store: String,
    },

    /// Show the review left on one order, if any
    Show {
        #[arg(long)]
        store: String,

        #[arg(long)]
        order: String,
    },
}

pub async fn run(cmd: ReviewCmd) -> Result<()> {
    let endpoints = super::load_endpoints()?;
    let client = super::reviews_client(&endpoints);

    match cmd {
        ReviewCmd::Create {
            store,
            order,
            rating,
            comment,
        } => {
            check_rating(rating)?;
            let review = client
                .create_review(&store, &order, rating, &comment)
                .await
                .context("could not create the review")?;
            println!("Reseña {} creada.", review.review_id);
            print_review(&review);
        }
        ReviewCmd::Update {
            review,
            rating,
            comment,
        } => {
            check_rating(rating)?;
            let review = client
                .update_review(&review, rating, &comment)
                .await
                .context("could not update the review")?;
            println!("Reseña {} actualizada.", review.review_id);
            print_review(&review);
        }
        ReviewCmd::Delete { review } => {
            client
                .delete_review(&review)
                .await
                .context("could not delete the review")?;
            println!("Reseña eliminada.");
        }
        ReviewCmd::List { store } => {
            let reviews = client
                .store_reviews(&store)
                .await
                .context("could not list reviews")?;
            if reviews.is_empty() {
                println!("Sin reseñas.");
            }
            for review in &reviews {
                print_review(review);
            }
        }
        ReviewCmd::Show { store, order } => {
            // One listing serves repeated by-order lookups.
            let cached = CachedStoreReviews::new(client);
            match cached
                .review_for_order(&store, &order)
                .await
                .context("could not look up the review")?
            {
                Some(review) => print_review(&review),
                None => println!("El pedido no tiene reseña."),
            }
        }
    }
    Ok(())
}

fn check_rating(rating: f32) -> Result<()> {
    if !(0.0..=5.0).contains(&rating) {
        bail!("rating must be between 0 and 5");
    }
    Ok(())
}

fn print_review(review: &Review) {
    let full = review.rating.round() as usize;
    let stars: String = "★".repeat(full.min(5)) + &"☆".repeat(5 - full.min(5));
    println!(
        "{}  pedido {}  {stars} {:.1}",
        review.review_id,
        render::short_id(&review.order_id),
        review.rating,
    );
    if !review.comment.is_empty() {
        println!("  “{}”", review.comment);
    }
}
