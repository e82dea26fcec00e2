//! Box-drawing tree renderer used by the REPL

use crate::config::compile_time::syntax::MAX_RENDER_DEPTH;
use crate::syntax::nodes::{ExpressionSyntax, SyntaxNode};

/// Render a tree one node per line, e.g.
///
/// ```text
/// └──BinaryExpression
///     ├──NumberExpression
///     │   └──NumberToken 1
///     ├──PlusToken
///     └──NumberExpression
///         └──NumberToken 2
/// ```
///
/// Expressions nested `MAX_RENDER_DEPTH` levels down collapse into a single
/// `… (N more levels)` line.
pub fn pretty_print(root: &ExpressionSyntax) -> String {
    let mut output = String::new();
    write_node(&mut output, SyntaxNode::Expression(root), "", true, 0);
    output
}

fn write_node(output: &mut String, node: SyntaxNode<'_>, indent: &str, is_last: bool, level: usize) {
    let marker = if is_last { "└──" } else { "├──" };
    output.push_str(indent);
    output.push_str(marker);

    if let SyntaxNode::Expression(expression) = node {
        if level >= MAX_RENDER_DEPTH {
            output.push_str(&format!("… ({} more levels)\n", expression.depth()));
            return;
        }
    }

    output.push_str(node.kind().as_str());

    if let SyntaxNode::Token(token) = node {
        if let Some(value) = token.value {
            output.push_str(&format!(" {}", value));
        } else if token.is_missing() {
            output.push_str(" (missing)");
        }
    }
    output.push('\n');

    let child_indent = format!("{}{}", indent, if is_last { "    " } else { "│   " });
    let children = node.children();
    let last_index = children.len().saturating_sub(1);
    for (index, child) in children.into_iter().enumerate() {
        write_node(output, child, &child_indent, index == last_index, level + 1);
    }
}
