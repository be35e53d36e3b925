//! skit text - Extract, transform and analyse text
//!
//! Every text argument accepts `-` to read from stdin.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::read_input;
use crate::cli::output::{emit, emit_list, emit_value};
use crate::error::Result;
use crate::text::{
    PhoneRegion, count_sentences, count_words, extract_emails, extract_hashtags, extract_mentions,
    extract_phone_numbers, extract_urls, is_palindrome, mask_sensitive_data, remove_extra_whitespace,
    slugify, truncate_text, validate_email, word_frequency,
};

#[derive(Args, Debug)]
pub struct TextArgs {
    #[command(subcommand)]
    pub command: TextCommand,
}

#[derive(Subcommand, Debug)]
pub enum TextCommand {
    /// Turn text into a URL-friendly slug
    Slugify {
        text: String,

        /// Separator placed between words
        #[arg(long, short, default_value = "-")]
        separator: String,

        /// Cut the slug to this many characters
        #[arg(long)]
        max_length: Option<usize>,
    },

    /// Extract email addresses
    Emails { text: String },

    /// Extract http(s) URLs
    Urls { text: String },

    /// Extract phone numbers
    Phones {
        text: String,

        /// us or uk
        #[arg(long, default_value = "us")]
        region: PhoneRegion,
    },

    /// Extract #hashtags
    Hashtags { text: String },

    /// Extract @mentions
    Mentions { text: String },

    /// Word frequencies
    Words {
        text: String,

        /// Only the N most frequent words
        #[arg(long, short = 'n')]
        top: Option<usize>,

        /// Count "Word" and "word" separately
        #[arg(long)]
        case_sensitive: bool,
    },

    /// Word, sentence and character counts
    Stats { text: String },

    /// Mask email local parts and phone numbers
    Mask {
        text: String,

        #[arg(long, default_value_t = '*')]
        mask_char: char,
    },

    /// Shorten text to a maximum length
    Truncate {
        text: String,

        #[arg(long, short = 'm')]
        max_length: usize,

        #[arg(long, default_value = "...")]
        suffix: String,
    },

    /// Check whether text reads the same backwards
    Palindrome {
        text: String,

        #[arg(long)]
        case_sensitive: bool,

        /// Treat spaces as significant
        #[arg(long)]
        keep_spaces: bool,
    },

    /// Check whether a string is a single valid email address
    ValidateEmail { email: String },
}

#[derive(Serialize)]
struct TextStats {
    words: usize,
    sentences: usize,
    characters: usize,
    normalized: String,
}

pub fn run(ctx: &AppContext, args: &TextArgs) -> Result<()> {
    match &args.command {
        TextCommand::Slugify {
            text,
            separator,
            max_length,
        } => {
            let slug = slugify(&read_input(text)?, separator, *max_length);
            emit_value(ctx, "text slugify", &slug)
        }
        TextCommand::Emails { text } => {
            emit_list(ctx, "text emails", &extract_emails(&read_input(text)?))
        }
        TextCommand::Urls { text } => emit_list(ctx, "text urls", &extract_urls(&read_input(text)?)),
        TextCommand::Phones { text, region } => emit_list(
            ctx,
            "text phones",
            &extract_phone_numbers(&read_input(text)?, *region),
        ),
        TextCommand::Hashtags { text } => {
            emit_list(ctx, "text hashtags", &extract_hashtags(&read_input(text)?))
        }
        TextCommand::Mentions { text } => {
            emit_list(ctx, "text mentions", &extract_mentions(&read_input(text)?))
        }
        TextCommand::Words {
            text,
            top,
            case_sensitive,
        } => {
            let counts = word_frequency(&read_input(text)?, *top, !case_sensitive);
            emit(ctx, "text words", &counts, |counts, layout| {
                for entry in counts {
                    layout.kv(&entry.word, &entry.count.to_string());
                }
            })
        }
        TextCommand::Stats { text } => {
            let text = read_input(text)?;
            let stats = TextStats {
                words: count_words(&text),
                sentences: count_sentences(&text),
                characters: text.chars().count(),
                normalized: remove_extra_whitespace(&text),
            };
            emit(ctx, "text stats", &stats, |stats, layout| {
                layout
                    .kv("words", &stats.words.to_string())
                    .kv("sentences", &stats.sentences.to_string())
                    .kv("characters", &stats.characters.to_string());
            })
        }
        TextCommand::Mask { text, mask_char } => {
            let masked = mask_sensitive_data(&read_input(text)?, *mask_char);
            emit_value(ctx, "text mask", &masked)
        }
        TextCommand::Truncate {
            text,
            max_length,
            suffix,
        } => {
            let truncated = truncate_text(&read_input(text)?, *max_length, suffix)?;
            emit_value(ctx, "text truncate", &truncated)
        }
        TextCommand::Palindrome {
            text,
            case_sensitive,
            keep_spaces,
        } => {
            let result = is_palindrome(&read_input(text)?, !case_sensitive, !keep_spaces);
            emit_value(ctx, "text palindrome", &result)
        }
        TextCommand::ValidateEmail { email } => {
            emit_value(ctx, "text validate-email", &validate_email(email))
        }
    }
}
