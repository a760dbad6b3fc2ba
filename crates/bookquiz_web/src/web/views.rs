use bookquiz::{BookId, Catalog, LayoutState, Question, Route, ScoreRecord, ScoreValue};
use leptos::prelude::*;

use super::follow;
use super::markdown::render_markdown;
use crate::ui_model::progress_label;

#[component]
pub(super) fn Home(
    catalog: StoredValue<Catalog>,
    layout: ReadSignal<LayoutState>,
    navigate: Callback<String>,
) -> impl IntoView {
    let cards = catalog.with_value(|c| {
        c.books()
            .iter()
            .map(|book| {
                let id = book.id;
                let href = Route::Book(id).href(c).unwrap_or_default();
                let progress = move || {
                    layout.with(|s| {
                        catalog.with_value(|c| {
                            c.get(id)
                                .map(|b| progress_label(s.score.progress_for(b)))
                                .unwrap_or_default()
                        })
                    })
                };
                view! {
                    <li class="book-card">
                        <a href=href.clone() on:click=follow(navigate, href)>
                            <h3>{book.title.clone()}</h3>
                        </a>
                        <p>{book.summary.clone()}</p>
                        <span class="progress">{progress}</span>
                    </li>
                }
            })
            .collect_view()
    });

    view! {
        <section class="home">
            <h2>"Library"</h2>
            <Show when=move || catalog.with_value(Catalog::is_empty)>
                <p class="subtle">"No books available."</p>
            </Show>
            <ul class="book-grid">{cards}</ul>
        </section>
    }
}

#[component]
pub(super) fn BookView(
    catalog: StoredValue<Catalog>,
    id: BookId,
    layout: ReadSignal<LayoutState>,
    on_score: Callback<ScoreRecord>,
) -> impl IntoView {
    let Some(book) = catalog.with_value(|c| c.get(id).cloned()) else {
        return view! { <p class="subtle">"This book is unavailable."</p> }.into_any();
    };

    let html = render_markdown(&book.content);
    let questions = book
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            view! {
                <QuestionCard
                    question=question.clone()
                    score_key=book.question_key(index)
                    layout=layout
                    on_score=on_score
                />
            }
        })
        .collect_view();

    view! {
        <article class="book">
            <h2>{book.title.clone()}</h2>
            <div class="book-content" inner_html=html></div>
            <section class="quiz">{questions}</section>
        </article>
    }
    .into_any()
}

#[component]
fn QuestionCard(
    question: Question,
    score_key: String,
    layout: ReadSignal<LayoutState>,
    on_score: Callback<ScoreRecord>,
) -> impl IntoView {
    let choices = question
        .choices
        .iter()
        .enumerate()
        .map(|(index, choice)| {
            let correct = question.is_correct(index);
            let score_key = score_key.clone();
            view! {
                <button
                    class="btn choice"
                    on:click=move |_| {
                        let next = layout
                            .with_untracked(|s| s.score.record_answer(&score_key, correct));
                        on_score.run(next);
                    }
                >
                    {choice.clone()}
                </button>
            }
        })
        .collect_view();

    let verdict = move || match layout.with(|s| s.score.get(&score_key)) {
        Some(ScoreValue::Flag(true)) => "Correct!",
        Some(ScoreValue::Flag(false)) => "Not quite, try again.",
        _ => "",
    };

    view! {
        <div class="question">
            <p class="prompt">{question.prompt.clone()}</p>
            <div class="choices">{choices}</div>
            <p class="verdict">{verdict}</p>
        </div>
    }
}

#[component]
pub(super) fn NotFound(navigate: Callback<String>) -> impl IntoView {
    view! {
        <section class="not-found">
            <h2>"Page not found"</h2>
            <a href="/" on:click=follow(navigate, "/".to_string())>
                "Back to the library"
            </a>
        </section>
    }
}
