//! Detailed documentation for the lesson markup and output types.
//!
//! This module contains reference documentation about the markup accepted
//! by lesson-deck and the decks it can write.

/// # Lesson Markup
///
/// A plain text file read line by line:
///
/// ```text
/// # Unit 3 - At the market
/// Slide 1
/// Title: Key Vocabulary
/// Template: vocabulary
/// Left: [vocabulary] apple
/// Right: a round fruit
/// Notes: Drill pronunciation.
/// ---
/// Slide 2
/// Title: Reading
/// LeftTop: Tom goes to the market every Sunday.
/// LeftBottom: 1. Who goes to the market? 2. When does he go?
/// Image: market.jpg | width=3 | align=center
/// ```
///
/// - `Slide <anything>` starts a new slide. A slide without `Title:` is dropped.
/// - `Content:`, `Left:`, `Right:`, `LeftTop:`, `RightTop:`, `LeftBottom:`,
///   `RightBottom:` and `Notes:` open a section; later plain lines are added
///   to the open section. Headers may be repeated.
/// - `Template: <name>` and `Image: <path> | key=value ...` do not change the
///   open section.
/// - Blank lines, `---` and lines starting with `#` are ignored.
/// - A `LeftBottom:` line containing `1.`, `2.` or `3.` is split into one entry
///   per question.
///
/// ## Layouts
///
/// Picked from the populated sections, first match wins:
///
/// 1. reading: `LeftTop` and `LeftBottom`, no `RightTop`/`RightBottom`
/// 2. four boxes: any of the four box sections
/// 3. two columns: `Left` or `Right`
/// 4. single column: `Content`
///
/// ## Inline Markers
///
/// - `[vocabulary]`, `[question]`, `[answer]`, `[emphasis]` (or any style from
///   the config) at the start of a line select a text style.
/// - `[step]` anywhere in a section puts every line of it in its own box,
///   revealed one after another.
/// - `x^2`, `H_2O`, `<=`, `>=`, `!=`, `~=`, `alpha` ... `sigma` become Unicode.
/// - Sections where most lines start with `-`, `•`, `*`, `1.`, `a)` or `A.` are
///   lists; their markers are removed (except `A.`).
pub mod markup {
    /// Documentation for the `vocabulary` template
    pub mod vocabulary {
        //! Adds "Word" / "Definition" headers to the two columns
    }

    /// Documentation for the `comparison` template
    pub mod comparison {
        //! Adds "Before" / "After" headers to the two columns
    }

    /// Documentation for the `reading` template
    pub mod reading {
        //! Passage on top, questions below; adds no headers
    }
}

/// # Types of Output
///
/// ## `html`
///
/// A single HTML page with one box per slide, regions positioned in inches
/// and speaker notes listed under each slide. Step boxes carry `data-step`.
///
/// ## `json`
///
/// Every render instruction (regions, paragraphs with resolved styles,
/// pictures, notes, reveal order) as pretty-printed JSON.
///
/// ## Common Options
///
/// `--no-slide-numbers`, `--no-animations`, `--no-overflow-warnings` override
/// the matching config flags.
pub mod output_types {
    /// Documentation for html output format
    pub mod html {
        //! HTML preview deck
    }

    /// Documentation for json output format
    pub mod json {
        //! JSON render manifest
    }
}
