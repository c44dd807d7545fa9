// Reference mesh and gold data for the box specimen: a 2 x 4 x 1 box tetrahedralized
// into 230 tets over 74 nodes, with a blueprint density field concentrated on one face.

pub const NODE_COORDINATES: [[f64; 3]; 74] = [
    [1.0, -2.0, 0.5],
    [-1.0, -2.0, 0.5],
    [0.0, -2.0, 0.5],
    [-1.0, -2.0, -0.5],
    [1.0, -2.0, -0.5],
    [0.0, -2.0, -0.5],
    [1.0, 2.0, 0.5],
    [1.0, 2.0, -0.5],
    [-1.0, 2.0, -0.5],
    [0.0, 2.0, -0.5],
    [-1.0, 2.0, 0.5],
    [0.0, 2.0, 0.5],
    [1.0, -1.0, -0.5],
    [1.0, 0.0, -0.5],
    [1.0, 1.0, -0.5],
    [1.0, -1.0, 0.5],
    [1.0, 0.0, 0.5],
    [1.0, 1.0, 0.5],
    [-1.0, 1.0, -0.5],
    [-1.0, 0.0, -0.5],
    [-1.0, -1.0, -0.5],
    [-1.0, 1.0, 0.5],
    [-1.0, 0.0, 0.5],
    [-1.0, -1.0, 0.5],
    [0.34649723, -2.0, 0.00066227364],
    [-0.45755927, -2.0, -0.0013018114],
    [0.37057984, 2.0, -0.0010030927],
    [-0.48425606, 2.0, -0.12747575],
    [0.37704415, -1.2851638, 0.5],
    [-0.38986427, -1.3331544, 0.5],
    [0.47721431, -0.56466477, 0.5],
    [-0.45127513, 0.41228361, 0.5],
    [0.33426469, 1.4277973, 0.5],
    [0.49931655, 0.3599322, 0.5],
    [-0.41495173, 1.2439895, 0.5],
    [-0.71110536, -0.50176541, 0.5],
    [0.12718026, 0.69585179, 0.5],
    [0.01383556, -0.81731689, 0.5],
    [-0.43732245, -0.84620111, 0.5],
    [-0.42138274, -0.12413886, 0.5],
    [0.37674078, -0.10905474, 0.5],
    [-0.30176796, -0.50405007, 0.5],
    [-0.011463497, 0.131595, 0.5],
    [-0.0072702803, -0.31737371, 0.5],
    [0.30368259, 1.3801634, -0.5],
    [0.32007693, 0.49573262, -0.5],
    [-0.32297714, -0.59135782, -0.5],
    [0.38761751, -1.4761064, -0.5],
    [0.36181753, -0.38191212, -0.5],
    [-0.34925889, -1.3889216, -0.5],
    [-0.45864357, 1.4575972, -0.5],
    [-0.43492309, 0.50528988, -0.5],
    [0.21925244, -0.96959312, -0.5],
    [-0.17417699, 0.049920719, -0.5],
    [-0.13999204, 0.92784471, -0.5],
    [-0.11241963, -0.47770185, 0.024559946],
    [0.13403264, -0.48723804, 0.31963932],
    [0.1658905, 0.045969729, 0.011225805],
    [0.60420996, -0.15343626, 0.091492117],
    [0.25935486, -0.68884358, 0.092958968],
    [-0.36511753, -0.28768576, -0.11661862],
    [-0.30765422, 0.12593259, 0.18706483],
    [-0.028055589, -1.1333659, -0.06168619],
    [-0.548339, 0.41417642, -0.0084496843],
    [-0.15004674, 0.63182813, 0.04886622],
    [0.45369823, -0.73889238, -0.17314432],
    [-0.016154908, 1.5802358, -0.09335794],
    [0.44728267, -1.3645467, 0.036961955],
    [-0.030335394, -1.5347573, -0.021365023],
    [-0.5720174, -1.0118763, 0.096961621],
    [-0.50626935, -1.4464236, -0.040889135],
    [-0.51374269, 1.2379537, -0.073816009],
    [0.38616245, 1.1675581, 0.023536345],
    [0.48247555, 0.53747499, 0.073740368],
];

pub const CONNECTIVITY: [[usize; 4]; 230] = [
    [37, 55, 41, 56],
    [43, 41, 55, 56],
    [7, 26, 9, 44],
    [43, 56, 55, 57],
    [40, 56, 57, 58],
    [56, 57, 58, 59],
    [30, 37, 56, 59],
    [43, 40, 56, 57],
    [34, 10, 11, 27],
    [39, 55, 60, 61],
    [29, 38, 37, 62],
    [22, 61, 60, 63],
    [22, 31, 61, 63],
    [31, 61, 63, 64],
    [43, 42, 40, 57],
    [43, 42, 57, 61],
    [15, 59, 58, 65],
    [15, 58, 13, 65],
    [32, 11, 26, 66],
    [48, 59, 52, 65],
    [52, 65, 59, 67],
    [13, 58, 48, 65],
    [47, 67, 62, 68],
    [24, 28, 67, 68],
    [24, 67, 47, 68],
    [29, 23, 69, 70],
    [20, 49, 69, 70],
    [49, 68, 62, 70],
    [29, 69, 62, 70],
    [0, 28, 15, 67],
    [4, 12, 47, 67],
    [25, 29, 68, 70],
    [28, 29, 62, 68],
    [28, 62, 67, 68],
    [52, 59, 62, 67],
    [5, 47, 49, 68],
    [24, 4, 47, 67],
    [9, 50, 44, 66],
    [41, 38, 35, 55],
    [49, 62, 46, 69],
    [46, 62, 55, 69],
    [29, 38, 62, 69],
    [35, 23, 20, 69],
    [29, 62, 68, 70],
    [28, 59, 15, 67],
    [52, 55, 46, 62],
    [1, 23, 29, 70],
    [29, 23, 38, 69],
    [28, 37, 59, 62],
    [27, 50, 9, 66],
    [26, 27, 9, 66],
    [34, 27, 66, 71],
    [32, 66, 26, 72],
    [32, 34, 66, 72],
    [13, 45, 58, 73],
    [39, 35, 22, 60],
    [45, 57, 58, 73],
    [33, 16, 58, 73],
    [36, 72, 17, 73],
    [34, 31, 21, 64],
    [47, 52, 62, 67],
    [5, 49, 25, 68],
    [15, 59, 65, 67],
    [52, 59, 55, 62],
    [37, 55, 59, 62],
    [55, 57, 56, 59],
    [14, 7, 44, 72],
    [30, 56, 58, 59],
    [36, 64, 34, 72],
    [44, 66, 54, 72],
    [34, 21, 10, 71],
    [27, 8, 50, 71],
    [34, 66, 64, 71],
    [34, 64, 21, 71],
    [48, 57, 55, 59],
    [33, 40, 57, 58],
    [53, 60, 61, 63],
    [48, 45, 57, 58],
    [34, 64, 66, 72],
    [50, 54, 66, 71],
    [18, 63, 51, 71],
    [36, 34, 32, 72],
    [31, 42, 61, 64],
    [21, 64, 63, 71],
    [21, 63, 18, 71],
    [53, 57, 45, 64],
    [51, 63, 53, 64],
    [31, 63, 21, 64],
    [11, 27, 26, 66],
    [53, 63, 61, 64],
    [39, 60, 22, 61],
    [51, 53, 45, 64],
    [19, 60, 53, 63],
    [35, 20, 22, 60],
    [21, 19, 18, 63],
    [35, 60, 55, 69],
    [53, 46, 55, 60],
    [22, 60, 19, 63],
    [41, 35, 39, 55],
    [43, 41, 39, 55],
    [48, 55, 52, 59],
    [37, 55, 56, 59],
    [2, 29, 28, 68],
    [38, 55, 62, 69],
    [22, 21, 31, 63],
    [19, 46, 53, 60],
    [43, 39, 42, 61],
    [10, 18, 8, 71],
    [30, 16, 15, 58],
    [48, 58, 59, 65],
    [30, 43, 40, 56],
    [33, 58, 57, 73],
    [16, 13, 58, 73],
    [32, 11, 6, 26],
    [36, 64, 72, 73],
    [17, 32, 6, 72],
    [51, 64, 54, 71],
    [32, 26, 6, 72],
    [22, 19, 21, 63],
    [8, 18, 50, 71],
    [28, 29, 37, 62],
    [28, 30, 15, 59],
    [12, 65, 52, 67],
    [0, 15, 12, 67],
    [15, 16, 13, 58],
    [44, 50, 54, 66],
    [14, 44, 45, 72],
    [54, 64, 66, 71],
    [49, 62, 69, 70],
    [23, 20, 69, 70],
    [24, 2, 28, 68],
    [44, 54, 45, 72],
    [36, 31, 34, 64],
    [13, 45, 48, 58],
    [36, 57, 42, 64],
    [36, 42, 31, 64],
    [30, 58, 15, 59],
    [33, 17, 16, 73],
    [12, 48, 52, 65],
    [46, 55, 60, 69],
    [47, 52, 49, 62],
    [25, 68, 49, 70],
    [17, 6, 7, 72],
    [51, 63, 64, 71],
    [10, 21, 18, 71],
    [27, 8, 9, 50],
    [37, 38, 55, 62],
    [25, 29, 2, 68],
    [34, 10, 27, 71],
    [42, 57, 61, 64],
    [28, 37, 30, 59],
    [30, 37, 43, 56],
    [3, 23, 1, 70],
    [35, 55, 38, 69],
    [3, 49, 20, 70],
    [24, 47, 5, 68],
    [6, 26, 7, 72],
    [22, 20, 19, 60],
    [48, 46, 52, 55],
    [3, 20, 23, 70],
    [17, 14, 16, 73],
    [30, 40, 16, 58],
    [15, 13, 12, 65],
    [53, 46, 48, 55],
    [48, 58, 57, 59],
    [39, 55, 35, 60],
    [53, 61, 57, 64],
    [36, 33, 57, 73],
    [16, 14, 13, 73],
    [53, 48, 45, 57],
    [53, 55, 57, 61],
    [25, 1, 2, 29],
    [0, 12, 4, 67],
    [5, 3, 25, 49],
    [49, 52, 46, 62],
    [47, 62, 49, 68],
    [20, 46, 60, 69],
    [0, 24, 28, 67],
    [33, 16, 40, 58],
    [43, 57, 55, 61],
    [45, 64, 57, 73],
    [19, 51, 18, 63],
    [34, 27, 11, 66],
    [13, 14, 45, 73],
    [36, 32, 17, 72],
    [13, 48, 12, 65],
    [43, 55, 39, 61],
    [36, 57, 64, 73],
    [19, 53, 51, 63],
    [39, 22, 31, 61],
    [17, 7, 14, 72],
    [37, 38, 41, 55],
    [35, 20, 60, 69],
    [51, 45, 54, 64],
    [15, 65, 12, 67],
    [45, 54, 64, 72],
    [33, 40, 42, 57],
    [14, 72, 45, 73],
    [43, 37, 41, 56],
    [24, 4, 5, 47],
    [0, 24, 2, 28],
    [25, 3, 1, 70],
    [35, 23, 22, 20],
    [26, 9, 44, 66],
    [45, 72, 64, 73],
    [53, 55, 48, 57],
    [28, 62, 59, 67],
    [24, 25, 2, 68],
    [35, 38, 23, 69],
    [19, 20, 46, 60],
    [53, 60, 55, 61],
    [39, 31, 42, 61],
    [7, 26, 44, 72],
    [24, 5, 25, 68],
    [25, 1, 29, 70],
    [0, 4, 24, 67],
    [20, 49, 46, 69],
    [26, 66, 44, 72],
    [27, 50, 66, 71],
    [36, 17, 33, 73],
    [18, 54, 50, 71],
    [10, 8, 27, 71],
    [17, 72, 14, 73],
    [12, 52, 47, 67],
    [32, 34, 11, 66],
    [18, 51, 54, 71],
    [30, 56, 40, 58],
    [25, 49, 3, 70],
    [36, 33, 42, 57],
    [54, 66, 64, 72],
];

pub const BLUEPRINT_DENSITY: [f64; 74] = [
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    1.0,
    1.0,
    1.0,
    1.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    1.0,
    0.0,
    0.0,
    1.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.62942016,
    1.0,
    0.0,
    0.0,
    0.0,
    0.18605334,
    0.28479974,
    0.0,
    0.55769735,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0015085389,
    0.0,
    0.26471438,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.70636678,
    0.21976224,
    0.0,
    0.0086950405,
    0.12989087,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.038743692,
    0.0,
    0.22710908,
    0.094803749,
    0.0,
    0.58701701,
    0.0,
    0.0,
    0.0,
    0.0,
    0.6294494,
    0.10285348,
    0.0,
];

pub const EXPECTED_GRID_BLUEPRINT_DENSITY: [f64; 30] = [
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.005796965405729706,
    0.0,
    1.0,
    0.15131295502704448,
    0.0,
    1.0,
    1.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.001047817792383411,
    0.0,
    1.0,
    0.22367817109148652,
    0.0,
    1.0,
    1.0,
    0.0,
];

pub const GRID_PRINTABLE_DENSITY: [f64; 30] = [
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.005796965405729706,
    0.0,
    1.0,
    0.15131295502704448,
    0.0,
    1.0,
    1.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.001047817792383411,
    0.0,
    1.0,
    0.22367817109148652,
    0.0,
    1.0,
    1.0,
    0.0,
];

pub const EXPECTED_TET_PRINTABLE_DENSITY: [f64; 74] = [
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    1.1102230246251565e-16,
    -1.1102230246251565e-16,
    0.9999999999999998,
    1.0,
    0.9999999999999997,
    0.9999999999999998,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    1.0,
    0.0,
    0.0,
    1.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.6294201599999999,
    1.0,
    0.0,
    0.0,
    0.0002384697378794606,
    0.23699402838545394,
    0.3700067334412932,
    0.04064530755328477,
    0.6566308093672806,
    0.00015082006656142117,
    0.13612980874350356,
    0.00018877022932029894,
    9.067729528537357e-05,
    0.0005310218741681526,
    0.0005818425824655059,
    0.0003628468653320529,
    0.03150553982083692,
    0.0007100677735630937,
    0.33002152180453476,
    0.05298911650925423,
    0.001603789013890911,
    0.0,
    0.002286629525267374,
    0.0,
    0.7507972703275654,
    0.2645868049415786,
    0.00013762052316638736,
    0.019481303388242742,
    0.250991352302035,
    0.0015324861188165777,
    0.0008456103979661292,
    0.00990143616169407,
    0.0010011242243771095,
    0.000686971378728081,
    0.001798193940276749,
    0.05780496245660334,
    0.0,
    0.26298515562689584,
    0.19839081573207248,
    0.0006054761783018672,
    0.6616594643197076,
    0.0,
    0.0,
    0.0,
    0.0,
    0.6969466321496821,
    0.19953101905606482,
    0.05437279229506226,
];
