//! Common test utilities for building documentation trees.
use blockmeta::prelude::*;

/// Parses a documentation XML snippet, panicking on malformed fixtures.
#[allow(dead_code)]
pub fn parse(xml: &str) -> DocumentTree {
    DocumentTree::parse(xml).expect("fixture XML failed to parse")
}

/// Wraps package markup in a documentation root element.
#[allow(dead_code)]
pub fn doc_with(packages: &str) -> String {
    format!("<ApamaDoc>{packages}</ApamaDoc>")
}

/// A complete single-block document: one package `pkg`, one block event
/// `MyBlock` in category `Math` with one `float` input, one `float` output,
/// and a parameters type with a defaulted `threshold` parameter.
#[allow(dead_code)]
pub fn simple_block_doc() -> String {
    doc_with(
        r#"
        <Package name="pkg">
            <Type name="MyBlock" category="Event">
                <Description>My Block.
Does math things.</Description>
                <DollarFields>
                    <DollarField name="$blockCategory"><Description>Math</Description></DollarField>
                </DollarFields>
                <Member name="$base" type="apama.analyticsbuilder.BlockBase"/>
                <Member name="$parameters" type="MyBlock_$Parameters" package="pkg"/>
                <Member name="$setOutput_result" type="action">
                    <Description>Result.
The computed result.</Description>
                    <Parameters>
                        <Parameter name="$channel" type="OutputChannel" package="apama.analyticsbuilder"/>
                        <Parameter name="output" type="float"/>
                    </Parameters>
                </Member>
                <Action name="$process">
                    <Parameters>
                        <Parameter name="$activation" type="Activation" package="apama.analyticsbuilder"/>
                        <Parameter name="$input_value" type="float">
                            <Description>The input value.</Description>
                        </Parameter>
                    </Parameters>
                </Action>
            </Type>
            <Type name="MyBlock_$Parameters" category="Event">
                <Member name="threshold" type="float">
                    <Description>Threshold.
The threshold to compare against.</Description>
                </Member>
                <Member name="$DEFAULT_threshold" type="float" typeValue="1.0" constant="true"/>
            </Type>
        </Package>"#,
    )
}

/// Builds a one-package document holding a minimal block event with the
/// given extra markup inside the type element.
#[allow(dead_code)]
pub fn block_event_doc(extra: &str) -> String {
    doc_with(&format!(
        r#"
        <Package name="pkg">
            <Type name="MyBlock" category="Event">
                <DollarFields>
                    <DollarField name="$blockCategory"><Description>Math</Description></DollarField>
                </DollarFields>
                <Member name="$base" type="BlockBase" package="apama.analyticsbuilder"/>
                {extra}
            </Type>
        </Package>"#
    ))
}
