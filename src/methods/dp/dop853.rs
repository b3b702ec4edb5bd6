//! DOP853 - Dormand–Prince 8(5) explicit Runge–Kutta pair with a 7th order
//! continuous extension.
//!
//! Reference
//! - E. Hairer, S. P. Nørsett, and G. Wanner, "Solving Ordinary Differential
//!   Equations I. Nonstiff Problems", 2nd ed., Springer (1993).
//!
//! Original Fortran implementation and supporting material
//! - https://www.unige.ch/~hairer/software.html
//!
//! Stage numbering below is 1-based as in the reference: stages 1..12 advance
//! the solution, stage 13 is the derivative at the end of the step and stages
//! 14..16 exist only for dense output.

use crate::{Float, methods::tableau::ButcherTableau};

/// Dormand–Prince 8(5) with 7th order dense output.
///
/// The 5th order embedded solution is `b - ER`, so the error estimate
/// `h Σ (b_i - b_hat_i) k_i` is the classic `h Σ ER_i k_i`.
pub static DOP853: ButcherTableau = ButcherTableau {
    name: "DOP853",
    order: 8,
    embedded_order: 5,
    stages: 12,
    fsal: 12,
    c: &[
        0.0, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11, 1.0, // stepping stages
        1.0, C14, C15, C16, // dense output stages
    ],
    a: &[
        &[],
        &[A21],
        &[A31, A32],
        &[A41, 0.0, A43],
        &[A51, 0.0, A53, A54],
        &[A61, 0.0, 0.0, A64, A65],
        &[A71, 0.0, 0.0, A74, A75, A76],
        &[A81, 0.0, 0.0, A84, A85, A86, A87],
        &[A91, 0.0, 0.0, A94, A95, A96, A97, A98],
        &[A101, 0.0, 0.0, A104, A105, A106, A107, A108, A109],
        &[A111, 0.0, 0.0, A114, A115, A116, A117, A118, A119, A1110],
        &[A121, 0.0, 0.0, A124, A125, A126, A127, A128, A129, A1210, A1211],
        &B,
        &[A141, 0.0, 0.0, 0.0, 0.0, 0.0, A147, A148, A149, A1410, A1411, A1412, A1413],
        &[A151, 0.0, 0.0, 0.0, 0.0, A156, A157, A158, 0.0, 0.0, A1511, A1512, A1513, A1514],
        &[A161, 0.0, 0.0, 0.0, 0.0, A166, A167, A168, A169, 0.0, 0.0, 0.0, A1613, A1614, A1615],
    ],
    b: &B,
    b_hat: &[
        B1 - ER1,
        0.0,
        0.0,
        0.0,
        0.0,
        B6 - ER6,
        B7 - ER7,
        B8 - ER8,
        B9 - ER9,
        B10 - ER10,
        B11 - ER11,
        B12 - ER12,
    ],
    dense: &[
        &[D41, 0.0, 0.0, 0.0, 0.0, D46, D47, D48, D49, D410, D411, D412, D413, D414, D415, D416],
        &[D51, 0.0, 0.0, 0.0, 0.0, D56, D57, D58, D59, D510, D511, D512, D513, D514, D515, D516],
        &[D61, 0.0, 0.0, 0.0, 0.0, D66, D67, D68, D69, D610, D611, D612, D613, D614, D615, D616],
        &[D71, 0.0, 0.0, 0.0, 0.0, D76, D77, D78, D79, D710, D711, D712, D713, D714, D715, D716],
    ],
};

const B: [Float; 12] = [B1, 0.0, 0.0, 0.0, 0.0, B6, B7, B8, B9, B10, B11, B12];

const C2: Float = 0.526001519587677318785587544488e-01;
const C3: Float = 0.789002279381515978178381316732e-01;
const C4: Float = 0.118350341907227396726757197510e+00;
const C5: Float = 0.281649658092772603273242802490e+00;
const C6: Float = 0.333333333333333333333333333333e+00;
const C7: Float = 0.25e+00;
const C8: Float = 0.307692307692307692307692307692e+00;
const C9: Float = 0.651282051282051282051282051282e+00;
const C10: Float = 0.6e+00;
const C11: Float = 0.857142857142857142857142857142e+00;
const C14: Float = 0.1e+00;
const C15: Float = 0.2e+00;
const C16: Float = 7.777_777_777_777_778e-1;

const A21: Float = 5.26001519587677318785587544488e-2;

const A31: Float = 1.97250569845378994544595329183e-2;
const A32: Float = 5.91751709536136983633785987549e-2;

const A41: Float = 2.95875854768068491816892993775e-2;
const A43: Float = 8.87627564304205475450678981324e-2;

const A51: Float = 2.41365134159266685502369798665e-1;
const A53: Float = -8.84549479328286085344864962717e-1;
const A54: Float = 9.24834003261792003115737966543e-1;

const A61: Float = 3.7037037037037037037037037037e-2;
const A64: Float = 1.70828608729473871279604482173e-1;
const A65: Float = 1.25467687566822425016691814123e-1;

const A71: Float = 3.7109375e-2;
const A74: Float = 1.70252211019544039314978060272e-1;
const A75: Float = 6.02165389804559606850219397283e-2;
const A76: Float = -1.7578125e-2;

const A81: Float = 3.70920001185047927108779319836e-2;
const A84: Float = 1.70383925712239993810214054705e-1;
const A85: Float = 1.07262030446373284651809199168e-1;
const A86: Float = -1.53194377486244017527936158236e-2;
const A87: Float = 8.27378916381402288758473766002e-3;

const A91: Float = 6.24110958716075717114429577812e-1;
const A94: Float = -3.36089262944694129406857109825e0;
const A95: Float = -8.68219346841726006818189891453e-1;
const A96: Float = 2.75920996994467083049415600797e1;
const A97: Float = 2.01540675504778934086186788979e1;
const A98: Float = -4.34898841810699588477366255144e1;

const A101: Float = 4.77662536438264365890433908527e-1;
const A104: Float = -2.48811461997166764192642586468e0;
const A105: Float = -5.90290826836842996371446475743e-1;
const A106: Float = 2.12300514481811942347288949897e1;
const A107: Float = 1.52792336328824235832596922938e1;
const A108: Float = -3.32882109689848629194453265587e1;
const A109: Float = -2.03312017085086261358222928593e-2;

const A111: Float = -9.3714243008598732571704021658e-1;
const A114: Float = 5.18637242884406370830023853209e0;
const A115: Float = 1.09143734899672957818500254654e0;
const A116: Float = -8.14978701074692612513997267357e0;
const A117: Float = -1.85200656599969598641566180701e1;
const A118: Float = 2.27394870993505042818970056734e1;
const A119: Float = 2.49360555267965238987089396762e0;
const A1110: Float = -3.0467644718982195003823669022e0;

const A121: Float = 2.27331014751653820792359768449e0;
const A124: Float = -1.05344954667372501984066689879e1;
const A125: Float = -2.00087205822486249909675718444e0;
const A126: Float = -1.79589318631187989172765950534e1;
const A127: Float = 2.79488845294199600508499808837e1;
const A128: Float = -2.85899827713502369474065508674e0;
const A129: Float = -8.87285693353062954433549289258e0;
const A1210: Float = 1.23605671757943030647266201528e1;
const A1211: Float = 6.43392746015763530355970484046e-1;

const B1: Float = 5.42937341165687622380535766363e-2;
const B6: Float = 4.45031289275240888144113950566e0;
const B7: Float = 1.89151789931450038304281599044e0;
const B8: Float = -5.8012039600105847814672114227e0;
const B9: Float = 3.1116436695781989440891606237e-1;
const B10: Float = -1.52160949662516078556178806805e-1;
const B11: Float = 2.01365400804030348374776537501e-1;
const B12: Float = 4.47106157277725905176885569043e-2;

const ER1: Float = 0.1312004499419488073250102996e-01;
const ER6: Float = -0.1225156446376204440720569753e+01;
const ER7: Float = -0.4957589496572501915214079952e+00;
const ER8: Float = 0.1664377182454986536961530415e+01;
const ER9: Float = -0.3503288487499736816886487290e+00;
const ER10: Float = 0.3341791187130174790297318841e+00;
const ER11: Float = 0.8192320648511571246570742613e-01;
const ER12: Float = -0.2235530786388629525884427845e-01;

const A141: Float = 5.61675022830479523392909219681e-2;
const A147: Float = 2.53500210216624811088794765333e-1;
const A148: Float = -2.46239037470802489917441475441e-1;
const A149: Float = -1.24191423263816360469010140626e-1;
const A1410: Float = 1.5329179827876569731206322685e-1;
const A1411: Float = 8.20105229563468988491666602057e-3;
const A1412: Float = 7.56789766054569976138603589584e-3;
const A1413: Float = -8.298e-3;

const A151: Float = 3.18346481635021405060768473261e-2;
const A156: Float = 2.83009096723667755288322961402e-2;
const A157: Float = 5.35419883074385676223797384372e-2;
const A158: Float = -5.49237485713909884646569340306e-2;
const A1511: Float = -1.08347328697249322858509316994e-4;
const A1512: Float = 3.82571090835658412954920192323e-4;
const A1513: Float = -3.40465008687404560802977114492e-4;
const A1514: Float = 1.41312443674632500278074618366e-1;

const A161: Float = -4.28896301583791923408573538692e-1;
const A166: Float = -4.69762141536116384314449447206e0;
const A167: Float = 7.68342119606259904184240953878e0;
const A168: Float = 4.06898981839711007970213554331e0;
const A169: Float = 3.56727187455281109270669543021e-1;
const A1613: Float = -1.39902416515901462129418009734e-3;
const A1614: Float = 2.9475147891527723389556272149e0;
const A1615: Float = -9.15095847217987001081870187138e0;

const D41: Float = -0.84289382761090128651353491142e+01;
const D46: Float = 0.56671495351937776962531783590e+00;
const D47: Float = -0.30689499459498916912797304727e+01;
const D48: Float = 0.23846676565120698287728149680e+01;
const D49: Float = 0.21170345824450282767155149946e+01;
const D410: Float = -0.87139158377797299206789907490e+00;
const D411: Float = 0.22404374302607882758541771650e+01;
const D412: Float = 0.63157877876946881815570249290e+00;
const D413: Float = -0.88990336451333310820698117400e-01;
const D414: Float = 0.18148505520854727256656404962e+02;
const D415: Float = -0.91946323924783554000451984436e+01;
const D416: Float = -0.44360363875948939664310572000e+01;

const D51: Float = 0.10427508642579134603413151009e+02;
const D56: Float = 0.24228349177525818288430175319e+03;
const D57: Float = 0.16520045171727028198505394887e+03;
const D58: Float = -0.37454675472269020279518312152e+03;
const D59: Float = -0.22113666853125306036270938578e+02;
const D510: Float = 0.77334326684722638389603898808e+01;
const D511: Float = -0.30674084731089398182061213626e+02;
const D512: Float = -0.93321305264302278729567221706e+01;
const D513: Float = 0.15697238121770843886131091075e+02;
const D514: Float = -0.31139403219565177677282850411e+02;
const D515: Float = -0.93529243588444783865713862664e+01;
const D516: Float = 0.35816841486394083752465898540e+02;

const D61: Float = 0.19985053242002433820987653617e+02;
const D66: Float = -0.38703730874935176555105901742e+03;
const D67: Float = -0.18917813819516756882830838328e+03;
const D68: Float = 0.52780815920542364900561016686e+03;
const D69: Float = -0.11573902539959630126141871134e+02;
const D610: Float = 0.68812326946963000169666922661e+01;
const D611: Float = -0.10006050966910838403183860980e+01;
const D612: Float = 0.77771377980534432092869265740e+00;
const D613: Float = -0.27782057523535084065932004339e+01;
const D614: Float = -0.60196695231264120758267380846e+02;
const D615: Float = 0.84320405506677161018159903784e+02;
const D616: Float = 0.11992291136182789328035130030e+02;

const D71: Float = -0.25693933462703749003312586129e+02;
const D76: Float = -0.15418974869023643374053993627e+03;
const D77: Float = -0.23152937917604549567536039109e+03;
const D78: Float = 0.35763911791061412378285349910e+03;
const D79: Float = 0.93405324183624310003907691704e+02;
const D710: Float = -0.37458323136451633156875139351e+02;
const D711: Float = 0.10409964950896230045147246184e+03;
const D712: Float = 0.29840293426660503123344363579e+02;
const D713: Float = -0.43533456590011143754432175058e+02;
const D714: Float = 0.96324553959188282948394950600e+02;
const D715: Float = -0.39177261675615439165231486172e+02;
const D716: Float = -0.14972683625798562581422125276e+03;
