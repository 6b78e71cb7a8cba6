//! TeX math parameters (the `\fontdimen` values of the math fonts), in ems.

/// Global metrics of the math font used by layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathParams {
    /// Height of a lowercase x.
    pub x_height: f64,
    /// One em.
    pub quad: f64,
    /// Height of the math axis above the baseline.
    pub axis_height: f64,
    /// Fraction bar and radical rule thickness.
    pub rule_thickness: f64,
    /// Numerator shift, display style.
    pub num1: f64,
    /// Numerator shift, text style.
    pub num2: f64,
    /// Numerator shift for bar-less fractions.
    pub num3: f64,
    /// Denominator shift, display style.
    pub denom1: f64,
    /// Denominator shift, text style.
    pub denom2: f64,
    /// Superscript shift, display style.
    pub sup1: f64,
    /// Superscript shift, text style.
    pub sup2: f64,
    /// Superscript shift, cramped styles.
    pub sup3: f64,
    /// Subscript shift without a superscript.
    pub sub1: f64,
    /// Subscript shift with a superscript.
    pub sub2: f64,
    /// Superscript baseline drop below the top of a boxed base.
    pub sup_drop: f64,
    /// Subscript baseline drop below the bottom of a boxed base.
    pub sub_drop: f64,
    /// Delimiter size for generalized fractions, display style.
    pub delim1: f64,
    /// Delimiter size for generalized fractions, text style.
    pub delim2: f64,
    /// Minimum gap above limits.
    pub big_op_spacing1: f64,
    /// Minimum gap below limits.
    pub big_op_spacing2: f64,
    /// Baseline clearance of an upper limit.
    pub big_op_spacing3: f64,
    /// Baseline clearance of a lower limit.
    pub big_op_spacing4: f64,
    /// Padding above and below limits.
    pub big_op_spacing5: f64,
    /// Extra clearance above radical content.
    pub surd_height: f64,
    /// Space after a script.
    pub scriptspace: f64,
    /// Width of an empty (`.`) delimiter.
    pub nulldelimiterspace: f64,
    /// `\delimiterfactor`, in thousandths.
    pub delimiter_factor: f64,
    /// `\delimitershortfall`.
    pub delimiter_shortfall: f64,
}

/// Parameters of the TeX (Computer Modern) math fonts.
pub const TEX_PARAMS: MathParams = MathParams {
    x_height: 0.442,
    quad: 1.0,
    axis_height: 0.25,
    rule_thickness: 0.06,
    num1: 0.677,
    num2: 0.394,
    num3: 0.444,
    denom1: 0.686,
    denom2: 0.345,
    sup1: 0.413,
    sup2: 0.363,
    sup3: 0.289,
    sub1: 0.15,
    sub2: 0.247,
    sup_drop: 0.386,
    sub_drop: 0.05,
    delim1: 2.39,
    delim2: 1.0,
    big_op_spacing1: 0.111,
    big_op_spacing2: 0.167,
    big_op_spacing3: 0.2,
    big_op_spacing4: 0.6,
    big_op_spacing5: 0.1,
    surd_height: 0.075,
    scriptspace: 0.05,
    nulldelimiterspace: 0.12,
    delimiter_factor: 901.0,
    delimiter_shortfall: 0.3,
};
